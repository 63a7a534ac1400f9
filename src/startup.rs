use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{handlers, AppState, Config};

/// Permissive by default: any origin is mirrored back with credentials
/// allowed. A configured origin list narrows it down.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let origin = match config.allowed_origins() {
        Some(origins) => AllowOrigin::list(origins.iter().filter_map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| tracing::warn!("Ignoring invalid CORS origin {}: {}", origin, e))
                .ok()
        })),
        None => AllowOrigin::mirror_request(),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = match state.config.max_request_body_bytes() {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        // Health check
        .route("/", get(handlers::health_check))
        .route("/health", get(handlers::health_check))
        .route("/upload", post(handlers::upload::upload_video))
        .layer(body_limit)
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
