//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Standard response envelope: `{status, message, data}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// `"success"` or `"error"`.
    pub status: String,
    /// Human-readable message.
    pub message: String,
    /// Response data, `null` when there is none.
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response carrying data.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    /// Creates a successful response with `data: null`.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

/// Session store health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Active strategy selector.
    pub strategy: String,
    /// Whether the session store answered.
    pub store: bool,
}
