//! `POST /message`: canned chat replies with a random handover.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{middleware, Json, Router};
use chrono::Utc;
use utoipa::OpenApi;

use crate::agents::AgentType;
use crate::extractors::{JsonBody, SessionId};
use crate::middleware::auth;
use crate::schemas::chat::{ChatQuestion, ChatResponse, HandoverMetadata};
use crate::schemas::message::{AiMessage, HumanMessage, Message};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(post_message),
    components(schemas(
        AgentType,
        ChatQuestion,
        ChatResponse,
        HandoverMetadata,
        Message,
        AiMessage,
        HumanMessage
    ))
)]
pub struct MessageApi;

/// Register message routes behind the API-key check.
pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/message", post(post_message))
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::require_api_key,
        ))
}

/// Answer a question with two canned messages.
///
/// One request in three (on average) also carries a handover to a randomly
/// chosen agent team.
#[utoipa::path(
    post,
    path = "/message",
    tag = "chat",
    request_body = ChatQuestion,
    params(
        ("X-API-Key" = String, Header, description = "Shared API key"),
        ("session_id" = String, Header, description = "Caller conversation id, echoed back"),
    ),
    responses(
        (status = 200, description = "Reply composed", body = ChatResponse),
        (status = 401, description = "Incorrect API Key."),
        (status = 422, description = "Missing header or body field"),
    )
)]
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    SessionId(session_id): SessionId,
    JsonBody(body): JsonBody<ChatQuestion>,
) -> Json<ChatResponse> {
    let now = Utc::now();
    Json(state.replies.compose(&body.question, session_id, now))
}
