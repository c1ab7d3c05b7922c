use crate::state::AppState;
use axum::http::HeaderValue;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub fn cors_layer(state: &Arc<AppState>) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_allowed_origins
        .as_deref()
        .map(|list| list.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_default();

    // Wildcard unless MOCK_CORS_ORIGINS lists at least one valid origin.
    let cors = CorsLayer::new().allow_headers(Any).allow_methods(Any);
    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}
