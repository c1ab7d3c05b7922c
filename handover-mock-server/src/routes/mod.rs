//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace-ID injection)
//! - Optional Swagger UI / OpenAPI document endpoint (disable with `MOCK_ENABLE_SWAGGER=false`)
//! - `GET /healthcheck`
//! - `POST /message`, protected by the `X-API-Key` check

pub mod doc;
mod health;
mod message;

use crate::middleware::{cors, trace};
use crate::state::AppState;
use axum::{middleware, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use utoipa_swagger_ui::SwaggerUi;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .merge(health::router())
        .merge(message::router(state.clone()));

    if state.config.enable_swagger {
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::get_docs()));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(ServiceBuilder::new().layer(cors::cors_layer(&state)))
        .layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::agents::AgentDirectory;
    use crate::config::{Config, HandoverStyle, DEFAULT_API_KEY};
    use crate::random::{RandomSource, ScriptedRandom, ThreadRandom};
    use crate::schemas::chat::ChatResponse;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::collections::HashSet;
    use tower::ServiceExt;

    fn app_with(style: HandoverStyle, rng: Arc<dyn RandomSource>) -> Router {
        let config = Config {
            handover_style: style,
            enable_swagger: false,
            ..Config::default()
        };
        build(Arc::new(AppState::new(config, AgentDirectory::builtin(), rng)))
    }

    fn scripted_app(style: HandoverStyle, script: impl IntoIterator<Item = u64>) -> Router {
        app_with(style, Arc::new(ScriptedRandom::new(script)))
    }

    fn message_request(api_key: Option<&str>, session_id: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/message")
            .header("content-type", "application/json");
        if let Some(key) = api_key {
            builder = builder.header("X-API-Key", key);
        }
        if let Some(sid) = session_id {
            builder = builder.header("session_id", sid);
        }
        builder.body(Body::from(body.to_owned())).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn healthcheck_returns_greeting_and_timestamp() {
        let app = app_with(HandoverStyle::Metadata, Arc::new(ThreadRandom));
        let req = Request::builder().uri("/healthcheck").body(Body::empty()).unwrap();
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(trace::X_TRACE_ID));
        let body = body_json(response).await;
        assert_eq!(body["message"], "Hello World");
        assert!(body["timestamp"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn example_request_echoes_question_and_session() {
        let app = scripted_app(HandoverStyle::Metadata, [17, 2]);
        let req = message_request(Some(DEFAULT_API_KEY), Some("abc123"), r#"{"question": "Hello"}"#);
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["session_id"], "abc123");
        assert_eq!(body["messages"][0]["content"], "Hi! Your message was 'Hello'");
        assert_eq!(body["messages"][1]["content"], "Random number: 17");
        assert_eq!(body["messages"][0]["type"], "ai");
        assert_eq!(body["messages"][0]["timestamp"], body["messages"][1]["timestamp"]);
        assert_eq!(body["metadata"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn handover_roll_attaches_agent_metadata() {
        let app = scripted_app(HandoverStyle::Metadata, [3, 5, 9]);
        let req = message_request(Some(DEFAULT_API_KEY), Some("s1"), r#"{"question": "Hi"}"#);
        let response = app.oneshot(req).await.unwrap();

        let body = body_json(response).await;
        assert_eq!(body["messages"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["metadata"]["handover"], true);
        assert_eq!(body["metadata"]["agent_type_id"], "5f7ec5333298c90c81b34680");
        assert_eq!(body["metadata"]["agent_type_name"], "Wifi Case Manager");
    }

    #[tokio::test]
    async fn transfer_style_shapes() {
        let app = scripted_app(HandoverStyle::Transfer, [3, 6, 8, 3, 4]);

        let req = message_request(Some(DEFAULT_API_KEY), Some("s1"), r#"{"question": "Hi"}"#);
        let body = body_json(app.clone().oneshot(req).await.unwrap()).await;
        assert_eq!(body["messages"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["metadata"]["agent_type_name"], "Televisie");
        assert!(body["messages"][2]["content"].as_str().is_some_and(|c| c.contains("Televisie")));

        let req = message_request(Some(DEFAULT_API_KEY), Some("s1"), r#"{"question": "Hi"}"#);
        let body = body_json(app.oneshot(req).await.unwrap()).await;
        assert_eq!(body["messages"].as_array().map(Vec::len), Some(2));
        assert!(body.get("metadata").is_none());
    }

    #[tokio::test]
    async fn wrong_api_key_is_rejected_before_any_draw() {
        // An empty script panics on the first draw.
        let app = scripted_app(HandoverStyle::Metadata, Vec::<u64>::new());
        let req = message_request(Some("wrong-key"), Some("abc123"), r#"{"question": "Hello"}"#);
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "Incorrect API Key.");
    }

    #[tokio::test]
    async fn missing_api_key_is_unauthorized() {
        let app = scripted_app(HandoverStyle::Metadata, Vec::<u64>::new());
        let req = message_request(None, Some("abc123"), r#"{"question": "Hello"}"#);
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_session_header_is_unprocessable() {
        let app = scripted_app(HandoverStyle::Metadata, Vec::<u64>::new());
        let req = message_request(Some(DEFAULT_API_KEY), None, r#"{"question": "Hello"}"#);
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(body["error"].as_str().is_some_and(|e| e.contains("session_id")));
    }

    #[tokio::test]
    async fn missing_question_is_unprocessable() {
        let app = scripted_app(HandoverStyle::Metadata, Vec::<u64>::new());
        let req = message_request(Some(DEFAULT_API_KEY), Some("abc123"), r#"{"text": "Hello"}"#);
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    fn oversized_question() -> String {
        format!(r#"{{"question": "{}"}}"#, "a".repeat(3 * 1024 * 1024))
    }

    #[tokio::test]
    async fn oversized_question_is_payload_too_large() {
        let app = scripted_app(HandoverStyle::Metadata, Vec::<u64>::new());
        let req = message_request(Some(DEFAULT_API_KEY), Some("abc123"), &oversized_question());
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn oversized_body_with_wrong_key_is_unauthorized() {
        let app = scripted_app(HandoverStyle::Metadata, Vec::<u64>::new());
        let req = message_request(Some("wrong-key"), Some("abc123"), &oversized_question());
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn absent_body_without_content_type_is_unprocessable() {
        let app = scripted_app(HandoverStyle::Metadata, Vec::<u64>::new());
        let req = Request::builder()
            .method("POST")
            .uri("/message")
            .header("X-API-Key", DEFAULT_API_KEY)
            .header("session_id", "abc123")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn empty_json_body_is_unprocessable() {
        let app = scripted_app(HandoverStyle::Metadata, Vec::<u64>::new());
        let req = message_request(Some(DEFAULT_API_KEY), Some("abc123"), "");
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn message_ids_are_unique_across_requests() {
        let app = app_with(HandoverStyle::Transfer, Arc::new(ThreadRandom));
        let mut ids = HashSet::new();
        for _ in 0..50 {
            let req = message_request(Some(DEFAULT_API_KEY), Some("s"), r#"{"question": "q"}"#);
            let bytes = app.clone().oneshot(req).await.unwrap().into_body().collect().await.unwrap().to_bytes();
            let resp: ChatResponse = serde_json::from_slice(&bytes).unwrap();
            assert!(resp.messages.len() >= 2);
            for m in &resp.messages {
                assert!(ids.insert(m.id()));
                assert_eq!(m.timestamp(), resp.timestamp);
            }
        }
    }

    #[tokio::test]
    async fn swagger_document_is_served_when_enabled() {
        let config = Config::default();
        let app = build(Arc::new(AppState::new(config, AgentDirectory::builtin(), Arc::new(ThreadRandom))));
        let req = Request::builder().uri("/api-docs/openapi.json").body(Body::empty()).unwrap();
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["paths"].get("/message").is_some());
        assert!(body["paths"].get("/healthcheck").is_some());
        assert!(body["components"]["schemas"].get("AgentType").is_some());
    }
}
