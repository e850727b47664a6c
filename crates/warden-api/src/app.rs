//! Application builder: wires the auth components into state and the router.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use warden_auth::{
    AuthDispatcher, Authenticator, PasswordResetFlow, PasswordValidator, UserDirectory,
};
use warden_core::config::AppConfig;
use warden_core::traits::SessionStore;

use crate::middleware::cors::build_cors_layer;
use crate::notifier::ResetNotifier;
use crate::router::build_router;
use crate::state::ApiState;

/// Builds the shared state over an already-connected store and directory.
pub fn build_state(
    config: AppConfig,
    store: Arc<dyn SessionStore>,
    directory: Arc<dyn UserDirectory>,
    notifier: Arc<dyn ResetNotifier>,
) -> ApiState {
    let auth_config = Arc::new(config.auth.clone());
    let dispatcher = AuthDispatcher::from_config(auth_config.clone(), store.clone(), directory);

    let authenticator = Authenticator::new(
        dispatcher.resolver().clone(),
        dispatcher.strategy().clone(),
    );
    let reset_flow = PasswordResetFlow::new(
        &auth_config,
        dispatcher.codec().clone(),
        dispatcher.resolver().clone(),
        PasswordValidator::new(&config.password),
        dispatcher.revocation().cloned(),
    );

    ApiState {
        config: Arc::new(config),
        store,
        dispatcher: Arc::new(dispatcher),
        authenticator: Arc::new(authenticator),
        reset_flow: Arc::new(reset_flow),
        notifier,
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: ApiState) -> Router {
    let cors = build_cors_layer(&state.config.auth.header_name);
    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
