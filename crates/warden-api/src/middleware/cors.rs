//! CORS layer configuration.

use axum::http::{HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};

/// Builds a CORS tower layer that exposes the credential header.
pub fn build_cors_layer(credential_header: &str) -> CorsLayer {
    let mut layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Clients read the issued credential from this header after login.
    if let Ok(name) = HeaderName::try_from(credential_header) {
        layer = layer.expose_headers([name]);
    }

    layer
}
