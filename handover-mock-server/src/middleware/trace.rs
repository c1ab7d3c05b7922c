use axum::{
    body::{Body, Bytes, HttpBody},
    extract::Request,
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use axum::response::IntoResponse;
use http_body_util::{BodyExt, Limited};
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::ServerError;

pub static X_TRACE_ID: &str = "x-trace-id";

/// Bodies above this size are summarized instead of logged.
const MAX_LOGGED_BODY: usize = 1024;

pub async fn trace_middleware(req: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();

    // Reuse the caller's trace id when it is a UUID, otherwise mint one.
    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        info!("→ request started");
        let header_value = HeaderValue::from_str(&trace_id.to_string()).ok();

        let (parts, body) = req.into_parts();
        let body = match log_small_body("request", &parts.headers, body).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "failed to read request body");
                return ServerError::BadRequest("failed to read request body".to_owned())
                    .into_response();
            }
        };
        let mut req = Request::from_parts(parts, body);
        if let Some(v) = header_value.clone() {
            req.headers_mut().insert(X_TRACE_ID, v);
        }

        let response = next.run(req).await;

        let (parts, body) = response.into_parts();
        let body = match log_small_body("response", &parts.headers, body).await {
            Ok(body) => body,
            Err(e) => {
                return ServerError::Internal(format!("failed to read response body: {e}"))
                    .into_response();
            }
        };
        let mut response = Response::from_parts(parts, body);
        if let Some(v) = header_value {
            response.headers_mut().insert(X_TRACE_ID, v);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );

        response
    }
    .instrument(span)
    .await
}

/// Log a body at debug level when it is small JSON of known length.
///
/// Only bodies whose exact size is at most [`MAX_LOGGED_BODY`] are buffered;
/// anything else is passed through unread, so the auth check still runs
/// before a large upload is consumed.
async fn log_small_body(direction: &str, headers: &HeaderMap, body: Body) -> Result<Body, axum::Error> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let small = body
        .size_hint()
        .exact()
        .is_some_and(|len| len > 0 && len <= MAX_LOGGED_BODY as u64);
    if !small || !content_type.contains("application/json") {
        if let Some(size) = body.size_hint().exact().filter(|len| *len > 0) {
            debug!(direction, content_type, size, "body skipped");
        }
        return Ok(body);
    }

    let bytes: Bytes = Limited::new(body, MAX_LOGGED_BODY)
        .collect()
        .await
        .map_err(axum::Error::new)?
        .to_bytes();
    if let Ok(text) = std::str::from_utf8(&bytes) {
        debug!(direction, body = text, "body");
    }
    Ok(Body::from(bytes))
}
