//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, StatusResponse};
use crate::state::ApiState;

/// GET /v1/status
pub async fn status(State(state): State<ApiState>) -> Json<ApiResponse<StatusResponse>> {
    let store = match state.store.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!(error = %e, "Session store health check failed");
            false
        }
    };

    let status = if store { "ok" } else { "degraded" };

    Json(ApiResponse::ok(
        "Status",
        StatusResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            strategy: state.dispatcher.kind().to_string(),
            store,
        },
    ))
}
