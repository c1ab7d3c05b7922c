//! JSON body extractor with [`ServerError`] rejections.

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, JsonRejection};
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::ServerError;

/// Like [`axum::Json`], but missing or mistyped fields become
/// [`ServerError::Validation`] (422) with the deserializer's detail.
///
/// An absent or empty body is a missing field too, whatever its content type.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_declared = is_json_content_type(req.headers());
        // Buffering goes through `Bytes` so `DefaultBodyLimit` still applies.
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(bytes_rejection_to_error)?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ServerError::Validation(
                "missing request body; expected a JSON object".to_owned(),
            ));
        }
        if !json_declared {
            return Err(ServerError::UnsupportedMediaType(
                "Expected request with `Content-Type: application/json`".to_owned(),
            ));
        }

        Json::<T>::from_bytes(&bytes)
            .map(|Json(value)| Self(value))
            .map_err(rejection_to_error)
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

fn bytes_rejection_to_error(rejection: BytesRejection) -> ServerError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServerError::PayloadTooLarge(rejection.body_text())
    } else {
        ServerError::BadRequest(rejection.body_text())
    }
}

fn rejection_to_error(rejection: JsonRejection) -> ServerError {
    match rejection {
        JsonRejection::JsonDataError(e) => ServerError::Validation(e.body_text()),
        JsonRejection::JsonSyntaxError(e) => ServerError::BadRequest(e.body_text()),
        JsonRejection::MissingJsonContentType(e) => ServerError::UnsupportedMediaType(e.body_text()),
        JsonRejection::BytesRejection(e) => bytes_rejection_to_error(e),
        other => ServerError::Internal(other.body_text()),
    }
}
