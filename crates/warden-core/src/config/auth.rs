//! Authentication configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Upper bound for any configured lifetime (ten years).
pub const MAX_TTL_SECONDS: u64 = 315_360_000;

/// Which credential strategy the process runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Signed token carried in a cookie.
    Cookie,
    /// Opaque session key backed by the session store.
    Session,
    /// Signed token carried in a request header.
    #[serde(alias = "jwt")]
    Token,
}

impl StrategyKind {
    /// Return the selector as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cookie => "cookie",
            Self::Session => "session",
            Self::Token => "token",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cookie" => Ok(Self::Cookie),
            "session" => Ok(Self::Session),
            "token" | "jwt" => Ok(Self::Token),
            _ => Err(AppError::configuration(format!(
                "Unknown auth strategy: '{s}'. Expected one of: cookie, session, token"
            ))),
        }
    }
}

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Active credential strategy.
    #[serde(default = "default_strategy")]
    pub strategy: StrategyKind,
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
    /// Header (and cookie) name carrying the credential artifact.
    #[serde(default = "default_header_name")]
    pub header_name: String,
    /// Session lifetime in seconds.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: u64,
    /// Reset token lifetime in seconds.
    #[serde(default = "default_reset_ttl")]
    pub reset_ttl_seconds: u64,
    /// Record logged-out and redeemed token ids so they cannot be reused.
    #[serde(default)]
    pub revocation_enabled: bool,
    /// Subject kinds consulted, in order, when resolving a subject id.
    #[serde(default = "default_subject_kinds")]
    pub subject_kinds: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            secret_key: default_secret_key(),
            header_name: default_header_name(),
            session_ttl_seconds: default_session_ttl(),
            reset_ttl_seconds: default_reset_ttl(),
            revocation_enabled: false,
            subject_kinds: default_subject_kinds(),
        }
    }
}

impl AuthConfig {
    /// Check the invariants the strategies rely on.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.secret_key.is_empty() {
            return Err(AppError::configuration("auth.secret_key must not be empty"));
        }
        if self.header_name.trim().is_empty() {
            return Err(AppError::configuration("auth.header_name must not be empty"));
        }
        if self.session_ttl_seconds == 0 || self.reset_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "auth.session_ttl_seconds and auth.reset_ttl_seconds must be positive",
            ));
        }
        if self.session_ttl_seconds > MAX_TTL_SECONDS || self.reset_ttl_seconds > MAX_TTL_SECONDS {
            return Err(AppError::configuration(format!(
                "auth.session_ttl_seconds and auth.reset_ttl_seconds must not exceed {MAX_TTL_SECONDS}"
            )));
        }
        if self.reset_ttl_seconds >= self.session_ttl_seconds {
            return Err(AppError::configuration(format!(
                "auth.reset_ttl_seconds ({}) must be less than auth.session_ttl_seconds ({})",
                self.reset_ttl_seconds, self.session_ttl_seconds
            )));
        }
        if self.subject_kinds.is_empty() {
            return Err(AppError::configuration(
                "auth.subject_kinds must name at least one subject kind",
            ));
        }
        Ok(())
    }
}

fn default_strategy() -> StrategyKind {
    StrategyKind::Token
}

fn default_secret_key() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_header_name() -> String {
    "x-token".to_string()
}

fn default_session_ttl() -> u64 {
    259_200
}

fn default_reset_ttl() -> u64 {
    900
}

fn default_subject_kinds() -> Vec<String> {
    vec!["user".to_string()]
}
