//! Password reset handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};

use warden_core::error::AppError;

use crate::dto::request::{ChangePasswordRequest, ResetRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::ApiState;

/// POST /v1/reset
pub async fn request_reset(
    State(state): State<ApiState>,
    body: Result<Json<ResetRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(req) = body?;
    let email = req.email()?;

    let subject = state
        .dispatcher
        .resolver()
        .find_by_email(email)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let issued = state.reset_flow.issue_reset_token(&subject)?;
    state.notifier.notify(&subject, &issued).await?;

    Ok(Json(ApiResponse::message("Request is being processed")))
}

/// PUT /v1/reset/{token}
pub async fn change_password(
    State(state): State<ApiState>,
    Path(token): Path<String>,
    body: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(req) = body?;
    let password = req.password()?;

    state.reset_flow.redeem(&token, password).await?;

    Ok(Json(ApiResponse::message("Password change success")))
}
