//! Agent directory: the fixed set of teams a conversation can be handed to.
//!
//! The directory is read-only once built and is never empty. A deployment
//! either uses [`AgentDirectory::builtin`] or loads its own table from a
//! JSON file of `[{"id": "...", "name": "..."}]` entries.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::random::RandomSource;

/// A handover target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AgentType {
    /// Opaque identifier understood by the routing backend.
    pub id: String,
    /// Human-readable team label.
    pub name: String,
}

impl AgentType {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("agent directory is empty")]
    Empty,

    #[error("duplicate agent id '{0}' in directory")]
    DuplicateId(String),

    #[error("failed to read agent directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse agent directory {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Table shipped with the service.
const BUILTIN_AGENTS: &[(&str, &str)] = &[
    ("5e6f49759090ee0588405615", "Fixed | B2B | Retention & Loyalty Advisor"),
    ("5d4973edd6cb00e5f3817795", "Fixed | B2B | Sales Advisor"),
    ("5cb85a21920026399882a18b", "Fixed | B2B | Service Advisor | Web"),
    ("5c59976e9200265b356e5fd4", "Fixed | B2C | OEC Advisor"),
    ("5d7a37f39090ee2bcfd9f4bb", "Facturen en betalen"),
    ("5d7a38279090ee1e45953aad", "Wifi Specialists (vh: Internet)"),
    ("5d7a38339090ee24b42e6ca7", "Monteur"),
    ("5d7a390a9090ee102c931ea8", "Overige vragen"),
    ("5d832b4a9090ee4fda3f8e7b", "Televisie"),
    ("5f7ec5333298c90c81b34680", "Wifi Case Manager"),
];

/// Ordered, non-empty list of [`AgentType`]s.
#[derive(Debug, Clone)]
pub struct AgentDirectory {
    agents: Vec<AgentType>,
}

impl AgentDirectory {
    /// Build a directory, rejecting empty lists and repeated ids.
    pub fn new(agents: Vec<AgentType>) -> Result<Self, DirectoryError> {
        if agents.is_empty() {
            return Err(DirectoryError::Empty);
        }
        let mut seen = HashSet::with_capacity(agents.len());
        for agent in &agents {
            if !seen.insert(agent.id.as_str()) {
                return Err(DirectoryError::DuplicateId(agent.id.clone()));
            }
        }
        Ok(Self { agents })
    }

    pub fn builtin() -> Self {
        Self {
            agents: BUILTIN_AGENTS
                .iter()
                .map(|(id, name)| AgentType::new(*id, *name))
                .collect(),
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, DirectoryError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let agents: Vec<AgentType> =
            serde_json::from_str(&raw).map_err(|source| DirectoryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(agents)
    }

    /// Uniformly pick one entry.
    pub fn pick_random(&self, rng: &dyn RandomSource) -> &AgentType {
        &self.agents[rng.index(self.agents.len())]
    }

    #[cfg(test)]
    pub fn contains(&self, id: &str) -> bool {
        self.agents.iter().any(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &AgentType> {
        self.agents.iter()
    }
}
