//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use warden_auth::{AuthDispatcher, Authenticator, PasswordResetFlow};
use warden_core::config::AppConfig;
use warden_core::traits::SessionStore;

use crate::notifier::ResetNotifier;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<ApiState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct ApiState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Session store (Redis or in-memory)
    pub store: Arc<dyn SessionStore>,
    /// Active strategy and shared auth components
    pub dispatcher: Arc<AuthDispatcher>,
    /// Email and password login
    pub authenticator: Arc<Authenticator>,
    /// Password reset issue and redemption
    pub reset_flow: Arc<PasswordResetFlow>,
    /// Reset token delivery
    pub notifier: Arc<dyn ResetNotifier>,
}
