//! Request DTOs.
//!
//! Fields are optional so a missing field is reported as a 400 in the
//! standard envelope rather than as a deserialization rejection.

use serde::{Deserialize, Serialize};

use warden_core::error::AppError;

/// Login request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

impl LoginRequest {
    /// Returns `(email, password)` or a validation error if either is blank.
    pub fn credentials(&self) -> Result<(&str, &str), AppError> {
        match (required(&self.email), required(&self.password)) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(AppError::validation("Bad Request")),
        }
    }
}

/// Password reset request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetRequest {
    /// Email of the account to reset.
    pub email: Option<String>,
}

impl ResetRequest {
    /// Returns the email or a validation error if it is blank.
    pub fn email(&self) -> Result<&str, AppError> {
        required(&self.email).ok_or_else(|| AppError::validation("Bad Request"))
    }
}

/// New password body for redeeming a reset token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    /// The new password.
    pub password: Option<String>,
}

impl ChangePasswordRequest {
    /// Returns the password or a validation error if it is absent.
    pub fn password(&self) -> Result<&str, AppError> {
        self.password
            .as_deref()
            .ok_or_else(|| AppError::validation("Bad Request"))
    }
}

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
