//! # warden-api
//!
//! HTTP API layer for Warden built on Axum.
//!
//! Provides the login, logout, password reset, and current-subject
//! endpoints, the middleware that resolves the request's subject once per
//! request, and the mapping from `AppError` to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod notifier;
pub mod router;
pub mod state;

pub use app::{build_app, build_state};
pub use error::ApiError;
pub use notifier::{ResetNotifier, TracingNotifier};
pub use state::ApiState;
