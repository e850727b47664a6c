//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use warden_core::error::{AppError, ErrorKind};

use crate::dto::response::ApiResponse;

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        Self(AppError::validation("Bad Request"))
    }
}

impl ApiError {
    /// HTTP status for the wrapped error kind.
    pub fn status(&self) -> StatusCode {
        match self.0.kind {
            ErrorKind::MissingCredential
            | ErrorKind::InvalidCredential
            | ErrorKind::ExpiredCredential
            | ErrorKind::UnknownSubject
            | ErrorKind::MissingSubject
            | ErrorKind::InvalidOrExpiredToken
            | ErrorKind::AccountNotActive
            | ErrorKind::IncorrectCredential => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Configuration | ErrorKind::Serialization | ErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            tracing::error!(kind = %self.0.kind, error = %self.0.message, "Request failed");
            match self.0.kind {
                ErrorKind::StoreUnavailable => "Service Unavailable".to_string(),
                _ => "Internal Server Error".to_string(),
            }
        } else {
            self.0.message
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}
