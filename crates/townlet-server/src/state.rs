//! Shared application state for the bridge server.
//!
//! [`AppState`] owns every piece of mutable state in the process: the
//! status cache and the two script queues. Everything is in-memory and
//! resets on restart. The state is wrapped in [`Arc`](std::sync::Arc) and
//! injected into handlers via Axum's `State` extractor.

use std::path::PathBuf;

use townlet_core::{ScriptQueue, StatusCache};

use crate::config::ServerConfig;
use crate::gemini::{GeminiClient, GeminiError};
use crate::notify::FrontendNotifier;

/// Shared state for the Axum application.
pub struct AppState {
    /// Last-writer-wins cache of the most recent browser status report.
    pub status: StatusCache,
    /// Mailbox drained by `GET /api/js-commands`. Movement, thought and
    /// capture scripts meant to actually run in the browser go here.
    pub execute_queue: ScriptQueue,
    /// Side-channel list the legacy capture and diagnostic routes append
    /// to. No route drains it; it exists as a second independent queue
    /// instance, retained from the source system.
    pub capture_queue: ScriptQueue,
    /// Fire-and-forget sender into `execute_queue`.
    pub notifier: FrontendNotifier,
    /// Gemini client; `None` when no credential is configured, in which
    /// case generation fails with a configuration payload.
    pub gemini: Option<GeminiClient>,
    /// Path of the static game page served at `GET /`.
    pub game_page: PathBuf,
}

impl AppState {
    /// Build the application state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the Gemini HTTP client cannot be constructed.
    pub fn new(config: &ServerConfig) -> Result<Self, GeminiError> {
        let execute_queue = ScriptQueue::new();
        let notifier = FrontendNotifier::new(execute_queue.clone());
        let gemini = config.gemini.as_ref().map(GeminiClient::new).transpose()?;

        Ok(Self {
            status: StatusCache::new(),
            execute_queue,
            capture_queue: ScriptQueue::new(),
            notifier,
            gemini,
            game_page: config.game_page.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn default_config_builds_state_without_gemini() {
        let state = AppState::new(&ServerConfig::default()).unwrap();
        assert!(state.gemini.is_none());
    }

    #[tokio::test]
    async fn notifier_feeds_the_execute_queue_not_the_side_channel() {
        let state = AppState::new(&ServerConfig::default()).unwrap();
        state.notifier.dispatch(String::from("go();")).await;

        assert_eq!(state.execute_queue.len().await, 1);
        assert!(state.capture_queue.is_empty().await);
    }
}
