//! Request / response types for `POST /message` and `GET /healthcheck`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::agents::AgentType;
use crate::schemas::message::Message;

/// Request body for `POST /message`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatQuestion {
    /// Free text; echoed back verbatim.
    pub question: String,
}

/// Handover directive attached to a reply.
///
/// Serializes to `{}` when no handover was rolled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HandoverMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handover: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_type_name: Option<String>,
}

impl HandoverMetadata {
    pub fn handover_to(agent: &AgentType) -> Self {
        Self {
            handover: Some(true),
            agent_type_id: Some(agent.id.clone()),
            agent_type_name: Some(agent.name.clone()),
        }
    }

    pub fn is_handover(&self) -> bool {
        self.handover.unwrap_or(false)
    }
}

/// Response body for `POST /message`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub messages: Vec<Message>,
    /// Absent in the `transfer` style when no handover was rolled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HandoverMetadata>,
    /// Shared by every message in `messages`.
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
}

impl ChatResponse {
    pub fn is_handover(&self) -> bool {
        self.metadata.as_ref().is_some_and(HandoverMetadata::is_handover)
    }
}

/// Response body for `GET /healthcheck`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
