//! Chat message model.
//!
//! A [`Message`] is tagged on the wire by its `type` field (`"human"` or
//! `"ai"`). Every message gets a fresh UUID v4 when constructed; the
//! timestamp is supplied by the caller so all messages of one response can
//! share it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A message written by the person in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HumanMessage {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub content: String,
}

/// A message written by the assistant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AiMessage {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub content: String,
    /// References to context documents backing the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_ids: Option<Vec<String>>,
}

/// One chat turn.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Human(HumanMessage),
    Ai(AiMessage),
}

impl Message {
    #[cfg(test)]
    pub fn human(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::Human(HumanMessage {
            id: Uuid::new_v4(),
            timestamp,
            content: content.into(),
        })
    }

    pub fn ai(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::Ai(AiMessage {
            id: Uuid::new_v4(),
            timestamp,
            content: content.into(),
            context_ids: None,
        })
    }

    pub fn id(&self) -> Uuid {
        match self {
            Self::Human(m) => m.id,
            Self::Ai(m) => m.id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Human(m) => m.timestamp,
            Self::Ai(m) => m.timestamp,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::Human(m) => &m.content,
            Self::Ai(m) => &m.content,
        }
    }

    #[cfg(test)]
    pub fn is_ai(&self) -> bool {
        matches!(self, Self::Ai(_))
    }
}

// Identity is the id alone.
impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Message {}
