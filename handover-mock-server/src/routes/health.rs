//! Liveness endpoint.

use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::schemas::chat::HealthResponse;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(healthcheck), components(schemas(HealthResponse)))]
pub struct HealthApi;

/// Register health-check routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/healthcheck", get(healthcheck))
}

/// Heartbeat endpoint.
///
/// Returns `{"message": "Hello World", "timestamp": "..."}` with HTTP 200.
#[utoipa::path(
    get,
    path = "/healthcheck",
    tag = "health",
    responses(
        (status = 200, description = "Server is alive", body = HealthResponse)
    )
)]
pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Hello World".to_owned(),
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn health_response_greets() {
        let Json(body) = healthcheck().await;
        assert_eq!(body.message, "Hello World");
    }

    #[tokio::test]
    async fn health_timestamp_is_current() {
        let before = Utc::now();
        let Json(body) = healthcheck().await;
        assert!(body.timestamp >= before && body.timestamp <= Utc::now());
    }
}
