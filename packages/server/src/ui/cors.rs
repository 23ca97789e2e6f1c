//! CORS layer configuration.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};

/// Builds the CORS layer for the client application origin.
///
/// `*` allows any origin; credentials are only allowed for an explicit origin.
pub fn build_cors_layer(client_url: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if client_url == "*" {
        return layer.allow_origin(Any);
    }

    match client_url.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin).allow_credentials(true),
        Err(e) => {
            tracing::warn!("Invalid client URL '{}' for CORS: {}", client_url, e);
            layer
        }
    }
}
