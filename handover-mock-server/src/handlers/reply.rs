//! Canned reply composition for `POST /message`.
//!
//! Every reply holds two AI messages: an echo of the question and a random
//! number. A die roll of 5 or 6 turns the reply into a handover to an agent
//! picked from the directory. How the handover shows up in the response is
//! decided by the configured [`HandoverStyle`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::agents::{AgentDirectory, AgentType};
use crate::config::HandoverStyle;
use crate::random::RandomSource;
use crate::schemas::chat::{ChatResponse, HandoverMetadata};
use crate::schemas::message::Message;

const DIE_FACES: u32 = 6;
/// Lowest roll that triggers a handover (5 or 6, i.e. one in three).
const HANDOVER_MIN_ROLL: u32 = 5;
const RANDOM_NUMBER_MAX: u32 = 99;

pub struct ReplyService {
    directory: Arc<AgentDirectory>,
    rng: Arc<dyn RandomSource>,
    style: HandoverStyle,
}

impl std::fmt::Debug for ReplyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplyService")
            .field("agents", &self.directory.len())
            .field("style", &self.style)
            .finish()
    }
}

impl ReplyService {
    pub fn new(
        directory: Arc<AgentDirectory>,
        rng: Arc<dyn RandomSource>,
        style: HandoverStyle,
    ) -> Self {
        Self {
            directory,
            rng,
            style,
        }
    }

    /// Build the reply to `question`. All messages carry `now`.
    pub fn compose(&self, question: &str, session_id: String, now: DateTime<Utc>) -> ChatResponse {
        let number = self.rng.int_inclusive(1, RANDOM_NUMBER_MAX);
        let mut messages = vec![
            Message::ai(format!("Hi! Your message was '{question}'"), now),
            Message::ai(format!("Random number: {number}"), now),
        ];

        let agent = self.roll_handover();

        let metadata = match (self.style, agent) {
            (HandoverStyle::Metadata, Some(agent)) => Some(HandoverMetadata::handover_to(agent)),
            (HandoverStyle::Metadata, None) => Some(HandoverMetadata::default()),
            (HandoverStyle::Transfer, Some(agent)) => {
                messages.push(Message::ai(transfer_text(agent), now));
                Some(HandoverMetadata::handover_to(agent))
            }
            (HandoverStyle::Transfer, None) => None,
        };

        let response = ChatResponse {
            messages,
            metadata,
            timestamp: now,
            session_id,
        };
        info!(
            session_id = %response.session_id,
            handover = response.is_handover(),
            agent_type_id = agent.map(|a| a.id.as_str()).unwrap_or(""),
            messages = response.messages.len(),
            "composed reply"
        );
        response
    }

    fn roll_handover(&self) -> Option<&AgentType> {
        let roll = self.rng.int_inclusive(1, DIE_FACES);
        if roll < HANDOVER_MIN_ROLL {
            return None;
        }
        Some(self.directory.pick_random(self.rng.as_ref()))
    }
}

fn transfer_text(agent: &AgentType) -> String {
    format!(
        "Transferring you to {} (agent type {}).",
        agent.name, agent.id
    )
}
