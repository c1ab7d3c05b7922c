//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::agents::AgentDirectory;
use crate::config::Config;
use crate::handlers::ReplyService;
use crate::random::RandomSource;

/// State shared across all HTTP handlers. Read-only after startup.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env + CLI derived).
    pub config: Arc<Config>,
    /// Composes `POST /message` replies.
    pub replies: Arc<ReplyService>,
}

impl AppState {
    pub fn new(config: Config, directory: AgentDirectory, rng: Arc<dyn RandomSource>) -> Self {
        let replies = ReplyService::new(Arc::new(directory), rng, config.handover_style);
        Self {
            config: Arc::new(config),
            replies: Arc::new(replies),
        }
    }
}
