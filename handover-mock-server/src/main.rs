//! handover-mock-server – entry point.
//!
//! Startup order:
//! 1. Parse configuration from environment variables and CLI flags.
//! 2. Initialise structured tracing (JSON or pretty).
//! 3. Load the agent directory.
//! 4. Build the Axum router and start the HTTP server with graceful shutdown.

mod agents;
mod config;
mod error;
mod extractors;
mod handlers;
mod middleware;
mod random;
mod routes;
mod schemas;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use crate::agents::AgentDirectory;
use crate::config::{Cli, Config};
use crate::random::ThreadRandom;
use crate::state::AppState;

fn main() -> anyhow::Result<()> {
    // ── 1. Configuration ───────────────────────────────────────────────────────
    let cfg = Config::from_env()
        .map_err(anyhow::Error::msg)?
        .apply_cli(Cli::parse());

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    init_tracing(&cfg);
    info!(version = env!("CARGO_PKG_VERSION"), "handover-mock-server starting");

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(cfg.workers)
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?
        .block_on(serve(cfg))
}

async fn serve(cfg: Config) -> anyhow::Result<()> {
    // ── 3. Agent directory ─────────────────────────────────────────────────────
    let directory = match &cfg.agent_directory_path {
        Some(path) => AgentDirectory::from_json_file(path)?,
        None => AgentDirectory::builtin(),
    };
    info!(
        agents = directory.len(),
        source = cfg
            .agent_directory_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "builtin".to_owned()),
        handover_style = %cfg.handover_style,
        "agent directory ready"
    );

    // ── 4. HTTP server with graceful shutdown ──────────────────────────────────
    let addr: SocketAddr = cfg
        .bind_address
        .parse()
        .with_context(|| format!("invalid bind address '{}'", cfg.bind_address))?;
    let state = Arc::new(AppState::new(cfg, directory, Arc::new(ThreadRandom)));
    let app = routes::build(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("handover-mock-server stopped");
    Ok(())
}

fn init_tracing(cfg: &Config) {
    // Build the log-level filter, warning loudly if the configured value is
    // not a valid tracing filter expression.
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match cfg.log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: MOCK_LOG='{}' is not a valid tracing filter ({}); \
                     falling back to 'info'",
                    cfg.log_level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true);

    if cfg.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Returns a future that resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
