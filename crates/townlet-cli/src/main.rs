//! Entry point for the Townlet game bridge.
//!
//! The bridge is a single-process server relaying between a browser RPG
//! and the Gemini API: the HTTP surface serves the game page and its
//! polling endpoints, the tool surface exposes the same operations to
//! tool-calling clients. Everything is in-memory and resets on restart.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use townlet_server::config::ServerConfig;
use townlet_server::server::start_server;
use townlet_server::state::AppState;

/// Application entry point.
///
/// Initializes logging, loads configuration from environment variables,
/// builds the shared state, and serves until terminated.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("townlet bridge starting");

    // Load configuration from environment
    let config = ServerConfig::from_env()?;
    info!(
        host = config.host,
        port = config.port,
        game_page = %config.game_page.display(),
        gemini_configured = config.gemini.is_some(),
        "configuration loaded"
    );

    let state = Arc::new(AppState::new(&config)?);

    start_server(&config, state).await?;

    Ok(())
}
