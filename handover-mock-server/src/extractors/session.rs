//! `session_id` header extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ServerError;

pub const SESSION_ID_HEADER: &str = "session_id";

/// Opaque caller-supplied conversation id, taken verbatim from the
/// `session_id` header. Only presence is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(SESSION_ID_HEADER).ok_or_else(|| {
            ServerError::Validation(format!("missing required header '{SESSION_ID_HEADER}'"))
        })?;
        let value = value.to_str().map_err(|_| {
            ServerError::Validation(format!("header '{SESSION_ID_HEADER}' is not valid text"))
        })?;
        Ok(Self(value.to_owned()))
    }
}
