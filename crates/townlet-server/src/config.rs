//! Configuration for the bridge server.
//!
//! All configuration is loaded from environment variables. The only
//! credential is the Gemini API key; when it is absent the generation
//! feature degrades gracefully and everything else keeps working.

use std::path::PathBuf;
use std::time::Duration;

/// Default Gemini REST endpoint base.
const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model identifier.
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-05-20";

/// Complete server configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address to bind to.
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
    /// Path to the static game page served at `GET /`.
    pub game_page: PathBuf,
    /// Gemini upstream configuration; `None` when no credential is set.
    pub gemini: Option<GeminiConfig>,
}

/// Configuration for the Gemini upstream client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base API URL (e.g. `https://generativelanguage.googleapis.com/v1beta`).
    pub api_url: String,
    /// API key appended to each request.
    pub api_key: String,
    /// Model identifier (e.g. `gemini-2.5-flash-preview-05-20`).
    pub model: String,
    /// Fixed timeout applied to each upstream call.
    pub timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
            game_page: PathBuf::from("rpg_gemini.html"),
            gemini: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `TOWNLET_HOST` -- bind address (default `127.0.0.1`)
    /// - `TOWNLET_PORT` -- listen port (default 8080)
    /// - `GAME_PAGE` -- path to the static game page (default `rpg_gemini.html`)
    /// - `GEMINI_API_KEY` -- upstream credential; absent means the
    ///   generation feature reports itself unavailable
    /// - `GEMINI_API_URL` -- upstream base URL (default Google endpoint)
    /// - `GEMINI_MODEL` -- model identifier
    /// - `GEMINI_TIMEOUT_MS` -- upstream call timeout (default 30000)
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("TOWNLET_HOST").unwrap_or_else(|_| String::from("127.0.0.1"));

        let port: u16 = std::env::var("TOWNLET_PORT")
            .unwrap_or_else(|_| String::from("8080"))
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("invalid TOWNLET_PORT: {e}")))?;

        let game_page = PathBuf::from(
            std::env::var("GAME_PAGE").unwrap_or_else(|_| String::from("rpg_gemini.html")),
        );

        let gemini = match std::env::var("GEMINI_API_KEY") {
            Ok(api_key) if !api_key.is_empty() => {
                let timeout_ms: u64 = std::env::var("GEMINI_TIMEOUT_MS")
                    .unwrap_or_else(|_| String::from("30000"))
                    .parse()
                    .map_err(|e| ConfigError::Invalid(format!("invalid GEMINI_TIMEOUT_MS: {e}")))?;

                Some(GeminiConfig {
                    api_url: std::env::var("GEMINI_API_URL")
                        .unwrap_or_else(|_| String::from(DEFAULT_GEMINI_API_URL)),
                    api_key,
                    model: std::env::var("GEMINI_MODEL")
                        .unwrap_or_else(|_| String::from(DEFAULT_GEMINI_MODEL)),
                    timeout: Duration::from_millis(timeout_ms),
                })
            }
            _ => None,
        };

        Ok(Self {
            host,
            port,
            game_page,
            gemini,
        })
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was present but could not be parsed.
    #[error("config error: {0}")]
    Invalid(String),
}
