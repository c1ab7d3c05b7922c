//! Unified server error type.
//!
//! Every handler and extractor rejects with [`ServerError`], which implements
//! [`axum::response::IntoResponse`] so errors are converted to a JSON-body
//! HTTP response with an appropriate status code.
//!
//! Internal errors are logged with full detail but only a generic message is
//! returned to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Message returned for a missing or wrong `X-API-Key`.
pub const INCORRECT_API_KEY: &str = "Incorrect API Key.";

/// All errors that can occur in the request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The API key header was absent or did not match.
    #[error("Incorrect API Key.")]
    Unauthorized,

    /// A required header or body field was missing or had the wrong type.
    #[error("validation error: {0}")]
    Validation(String),

    /// The request body could not be parsed at all.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the configured body limit.
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// The request body was not declared as JSON.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// An unclassified internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            ServerError::Unauthorized => (StatusCode::UNAUTHORIZED, INCORRECT_API_KEY.to_owned()),
            ServerError::Validation(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ServerError::PayloadTooLarge(m) => (StatusCode::PAYLOAD_TOO_LARGE, m.clone()),
            ServerError::UnsupportedMediaType(m) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, m.clone()),
            ServerError::Internal(m) => {
                error!(message = %m, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}
