//! Route definitions for the Warden HTTP API.
//!
//! All routes are mounted under `/v1` and run behind the subject
//! resolution middleware.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::ApiState;

/// Build the Axum router with all routes and the subject middleware.
pub fn build_router(state: ApiState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(reset_routes())
        .merge(health_routes());

    Router::new()
        .nest("/v1", api_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::resolve_subject,
        ))
        .with_state(state)
}

/// Login, logout, me
fn auth_routes() -> Router<ApiState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", delete(handlers::auth::logout))
        .route("/me", get(handlers::auth::me))
}

/// Password reset request and redemption
fn reset_routes() -> Router<ApiState> {
    Router::new()
        .route("/reset", post(handlers::reset::request_reset))
        .route("/reset/{token}", put(handlers::reset::change_password))
}

/// Status
fn health_routes() -> Router<ApiState> {
    Router::new().route("/status", get(handlers::health::status))
}
