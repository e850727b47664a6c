//! Signed token claims shared by session and reset tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims payload embedded in every signed token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject id. Optional on the wire so a token without one can be
    /// told apart from a malformed token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token id, used as the revocation key.
    pub jti: String,
    /// What the token may be used for.
    pub purpose: TokenPurpose,
}

/// Distinguishes session tokens from password-reset tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Authenticates requests until it expires.
    Session,
    /// Authorizes a single credential change.
    Reset,
}

impl TokenClaims {
    /// Returns the subject id, treating an empty string as absent.
    pub fn subject_id(&self) -> Option<&str> {
        self.sub.as_deref().filter(|s| !s.is_empty())
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Seconds left before `now` reaches the expiry (0 if expired).
    pub fn remaining_ttl_seconds(&self, now: DateTime<Utc>) -> u64 {
        let remaining = self.exp - now.timestamp();
        if remaining > 0 { remaining as u64 } else { 0 }
    }
}
