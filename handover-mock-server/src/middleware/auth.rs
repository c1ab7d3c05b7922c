//! `X-API-Key` check for protected routes.
//!
//! Runs as a route layer so an unauthenticated request is rejected before
//! any extractor or random draw happens.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::error::ServerError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    match provided {
        Some(key) if key_matches(key, &state.config.api_key) => next.run(req).await,
        _ => {
            debug!(present = provided.is_some(), "rejected API key");
            ServerError::Unauthorized.into_response()
        }
    }
}

fn key_matches(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}
