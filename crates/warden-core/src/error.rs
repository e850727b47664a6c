//! Unified application error types for Warden.
//!
//! Every strategy, flow, and adapter fails with an [`AppError`] whose
//! [`ErrorKind`] tells the caller exactly which failure occurred. Mapping a
//! kind to a user-facing category (HTTP status, CLI exit code) is left to
//! the boundary layer.

use std::fmt;
use thiserror::Error;

/// Error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// No credential artifact was present on the request.
    MissingCredential,
    /// The credential was malformed, badly signed, or revoked.
    InvalidCredential,
    /// The credential was well-formed but its lifetime has elapsed.
    ExpiredCredential,
    /// The credential is valid but the subject it names no longer exists.
    UnknownSubject,
    /// A session was requested, or a token decoded, without a subject id.
    MissingSubject,
    /// Reset-token redemption failed. Deliberately does not say why.
    InvalidOrExpiredToken,
    /// Login was refused because the account is not active.
    AccountNotActive,
    /// Login was refused because the secret did not match.
    IncorrectCredential,
    /// A backing store (session store or directory) failed transiently.
    StoreUnavailable,
    /// The requested resource was not found.
    NotFound,
    /// Input validation failed.
    Validation,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl ErrorKind {
    /// Whether the caller may reasonably retry the same operation.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StoreUnavailable)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential => write!(f, "MISSING_CREDENTIAL"),
            Self::InvalidCredential => write!(f, "INVALID_CREDENTIAL"),
            Self::ExpiredCredential => write!(f, "EXPIRED_CREDENTIAL"),
            Self::UnknownSubject => write!(f, "UNKNOWN_SUBJECT"),
            Self::MissingSubject => write!(f, "MISSING_SUBJECT"),
            Self::InvalidOrExpiredToken => write!(f, "INVALID_OR_EXPIRED_TOKEN"),
            Self::AccountNotActive => write!(f, "ACCOUNT_NOT_ACTIVE"),
            Self::IncorrectCredential => write!(f, "INCORRECT_CREDENTIAL"),
            Self::StoreUnavailable => write!(f, "STORE_UNAVAILABLE"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Warden.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a missing-credential error.
    pub fn missing_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingCredential, message)
    }

    /// Create an invalid-credential error.
    pub fn invalid_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCredential, message)
    }

    /// Create an expired-credential error.
    pub fn expired_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExpiredCredential, message)
    }

    /// Create an unknown-subject error.
    pub fn unknown_subject(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownSubject, message)
    }

    /// Create a missing-subject error.
    pub fn missing_subject(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingSubject, message)
    }

    /// Create the merged reset-flow error.
    ///
    /// The message is fixed so callers cannot learn which check failed.
    pub fn invalid_or_expired_token() -> Self {
        Self::new(ErrorKind::InvalidOrExpiredToken, "Invalid or expired token")
    }

    /// Create an account-not-active error.
    pub fn account_not_active(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AccountNotActive, message)
    }

    /// Create an incorrect-credential error.
    pub fn incorrect_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IncorrectCredential, message)
    }

    /// Create a store-unavailable error.
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StoreUnavailable, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether this error carries the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// Whether the caller may reasonably retry the same operation.
    pub fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_code() {
        let err = AppError::expired_credential("Expired Signature, please log in again.");
        assert_eq!(
            err.to_string(),
            "EXPIRED_CREDENTIAL: Expired Signature, please log in again."
        );
    }

    #[test]
    fn test_reset_error_message_is_fixed() {
        let err = AppError::invalid_or_expired_token();
        assert_eq!(err.kind, ErrorKind::InvalidOrExpiredToken);
        assert_eq!(err.message, "Invalid or expired token");
    }

    #[test]
    fn test_only_store_failures_are_transient() {
        assert!(ErrorKind::StoreUnavailable.is_transient());
        assert!(!ErrorKind::UnknownSubject.is_transient());
        assert!(!ErrorKind::ExpiredCredential.is_transient());
    }

    #[test]
    fn test_error_transience_follows_kind() {
        assert!(AppError::new(ErrorKind::StoreUnavailable, "Redis error").is_transient());
        assert!(!AppError::unknown_subject("user_id not found").is_transient());
    }
}
