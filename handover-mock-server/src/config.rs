//! Server configuration, loaded from environment variables at startup and
//! optionally overridden from the command line.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

/// API key the mock endpoint has always accepted.
pub const DEFAULT_API_KEY: &str = "605c68d5-19f1-4ab7-ab72-b660d8964861";

/// Shape of a `POST /message` response when a handover is (or is not) rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandoverStyle {
    /// Two messages, `metadata` always present (`{}` when no handover).
    #[default]
    Metadata,
    /// A third transfer message on handover; `metadata` omitted otherwise.
    Transfer,
}

impl FromStr for HandoverStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metadata" => Ok(Self::Metadata),
            "transfer" => Ok(Self::Transfer),
            other => Err(format!(
                "unknown handover style '{other}' (expected 'metadata' or 'transfer')"
            )),
        }
    }
}

impl fmt::Display for HandoverStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metadata => f.write_str("metadata"),
            Self::Transfer => f.write_str("transfer"),
        }
    }
}

/// Runtime configuration for handover-mock-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:8000"`).
    pub bind_address: String,

    /// Tokio worker threads serving requests.
    pub workers: usize,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Value every `X-API-Key` header must match.
    pub api_key: String,

    /// JSON file holding the agent directory; `None` uses the built-in table.
    pub agent_directory_path: Option<PathBuf>,

    /// Response contract for `POST /message`.
    pub handover_style: HandoverStyle,

    /// Comma-separated CORS origins. `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI and the OpenAPI document.
    pub enable_swagger: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_owned(),
            workers: 1,
            log_level: "info".to_owned(),
            log_json: false,
            api_key: DEFAULT_API_KEY.to_owned(),
            agent_directory_path: None,
            handover_style: HandoverStyle::Metadata,
            cors_allowed_origins: None,
            enable_swagger: true,
        }
    }
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    ///
    /// Fails only when `MOCK_HANDOVER_STYLE` names an unknown style.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();
        let handover_style = match std::env::var("MOCK_HANDOVER_STYLE") {
            Ok(v) => v.parse()?,
            Err(_) => defaults.handover_style,
        };
        Ok(Self {
            bind_address: env_or("MOCK_BIND", &defaults.bind_address),
            workers: parse_env("MOCK_WORKERS", defaults.workers).max(1),
            log_level: env_or("MOCK_LOG", &defaults.log_level),
            log_json: env_flag("MOCK_LOG_JSON", defaults.log_json),
            api_key: env_or("MOCK_API_KEY", &defaults.api_key),
            agent_directory_path: std::env::var("MOCK_AGENT_DIRECTORY")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            handover_style,
            cors_allowed_origins: std::env::var("MOCK_CORS_ORIGINS")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            enable_swagger: env_flag("MOCK_ENABLE_SWAGGER", defaults.enable_swagger),
        })
    }

    /// Apply command-line overrides on top of the environment.
    pub fn apply_cli(mut self, cli: Cli) -> Self {
        if let Some(bind) = cli.bind {
            self.bind_address = bind;
        }
        if let Some(workers) = cli.workers {
            self.workers = workers.max(1);
        }
        if let Some(path) = cli.agents {
            self.agent_directory_path = Some(path);
        }
        if let Some(style) = cli.handover_style {
            self.handover_style = style;
        }
        self
    }
}

/// Command-line flags. Each one overrides its environment variable.
#[derive(Debug, Default, Parser)]
#[command(name = "handover-mock-server", version, about)]
pub struct Cli {
    /// Address to listen on, e.g. `127.0.0.1:8000`.
    #[arg(long)]
    pub bind: Option<String>,

    /// Number of tokio worker threads.
    #[arg(long)]
    pub workers: Option<usize>,

    /// Path to a JSON agent directory.
    #[arg(long)]
    pub agents: Option<PathBuf>,

    /// `metadata` or `transfer`.
    #[arg(long, value_parser = HandoverStyle::from_str)]
    pub handover_style: Option<HandoverStyle>,
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
