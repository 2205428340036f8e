//! The shared operation layer.
//!
//! Every game operation is implemented exactly once here and exposed
//! twice: the HTTP handlers wrap these payloads in `Json`, the tool
//! surface serializes them to strings. Payload shapes are the external
//! contract with the game page and with tool callers.
//!
//! Operations that touch the browser (movement, thoughts, status capture)
//! dispatch a script through the mailbox and return immediately; their
//! success never depends on the browser being reachable.

use serde_json::Value;

use townlet_core::{map, script};

use crate::gemini::{self, GeminiError, Message};
use crate::state::AppState;

/// Report whether the upstream credential is configured.
pub fn get_config(state: &AppState) -> Value {
    serde_json::json!({
        "gemini_api_available": state.gemini.is_some(),
        "message": "Gemini API access is proxied by the bridge",
    })
}

/// Return the destination coordinates scanned from the static map.
pub fn get_destinations() -> Value {
    serde_json::json!({
        "destinations": map::destinations(),
        "message": "coordinates scanned from the static map layout",
    })
}

/// Trigger movement toward a named destination.
///
/// The lookup is case-insensitive. An unknown destination returns
/// `success: false` and lists every valid name. A known destination
/// queues the movement script (best-effort) and returns the target
/// coordinates immediately; the move itself runs in the browser.
pub async fn move_player(state: &AppState, destination: &str) -> Value {
    let destination = destination.to_lowercase();
    let destinations = map::destinations();

    let Some(target) = destinations.get(&destination).copied() else {
        let available = destinations
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        return serde_json::json!({
            "success": false,
            "message": format!(
                "destination '{destination}' not found; available destinations: {available}"
            ),
        });
    };

    state.notifier.dispatch(script::move_player(&destination)).await;

    serde_json::json!({
        "success": true,
        "message": format!("moving toward {destination}"),
        "new_position": target,
        "frontend_triggered": true,
        "player_status": {
            "destination": destination,
            "target_coordinates": target,
            "movement_type": "pathfinding",
            "status": "moving",
        },
    })
}

/// Return the player status.
///
/// Queues a capture script so the browser refreshes the cache on its next
/// poll, then returns the current cached snapshot. The result is
/// eventually consistent: a freshly captured status shows up on a later
/// query, not this one.
pub async fn get_player_status(state: &AppState) -> Value {
    state.notifier.dispatch(script::status_capture()).await;

    serde_json::json!({
        "player_status": state.status.snapshot().await,
    })
}

/// Display `texto` in a thought bubble above the player.
///
/// Queues the dialogue script and reports success immediately regardless
/// of delivery.
pub async fn pensamento(state: &AppState, texto: &str) -> Value {
    state.notifier.dispatch(script::thought_bubble(texto)).await;

    serde_json::json!({
        "success": true,
        "message": format!("thought '{texto}' queued for display"),
        "texto": texto,
    })
}

/// Forward message turns to the Gemini API.
///
/// With no credential configured this fails immediately with the
/// configuration payload and never attempts a network call. All other
/// outcomes are mapped by [`GeminiError::status_code`].
pub async fn generate(state: &AppState, contents: &[Message]) -> Value {
    let Some(client) = &state.gemini else {
        return gemini::error_payload(&GeminiError::MissingCredential);
    };

    match client.generate(contents).await {
        Ok(text) => serde_json::json!({ "response": text }),
        Err(error) => gemini::error_payload(&error),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::config::ServerConfig;

    fn test_state() -> AppState {
        AppState::new(&ServerConfig::default()).unwrap()
    }

    #[test]
    fn config_reports_gemini_unavailable_without_credential() {
        let state = test_state();
        let payload = get_config(&state);
        assert_eq!(payload["gemini_api_available"], false);
    }

    #[test]
    fn destinations_payload_contains_all_markers() {
        let payload = get_destinations();
        let destinations = payload["destinations"].as_object().unwrap();
        assert_eq!(destinations.len(), 5);
        assert_eq!(destinations["casa"], serde_json::json!({"x": 9, "y": 3}));
    }

    #[tokio::test]
    async fn move_player_is_case_insensitive() {
        let state = test_state();
        let lower = move_player(&state, "casa").await;
        let upper = move_player(&state, "CASA").await;
        assert_eq!(lower, upper);
        assert_eq!(lower["success"], true);
        assert_eq!(lower["new_position"], serde_json::json!({"x": 9, "y": 3}));
    }

    #[tokio::test]
    async fn move_player_unknown_lists_valid_destinations() {
        let state = test_state();
        let payload = move_player(&state, "nonexistent").await;
        assert_eq!(payload["success"], false);
        let message = payload["message"].as_str().unwrap();
        for name in ["casa", "trabalho", "mercado", "banco", "loja_carros"] {
            assert!(message.contains(name), "missing {name} in: {message}");
        }
        // Nothing was queued for an unknown destination.
        assert!(state.execute_queue.is_empty().await);
    }

    #[tokio::test]
    async fn move_player_queues_the_movement_script() {
        let state = test_state();
        let payload = move_player(&state, "mercado").await;
        assert_eq!(payload["frontend_triggered"], true);

        let drained = state.execute_queue.drain().await;
        assert_eq!(drained.len(), 1);
        assert!(drained.first().unwrap().script.contains("mcpMovePlayer"));
    }

    #[tokio::test]
    async fn status_query_returns_cache_and_queues_capture() {
        let state = test_state();
        let payload = get_player_status(&state).await;
        assert_eq!(payload["player_status"]["stamina"], 100);

        let drained = state.execute_queue.drain().await;
        assert!(drained.first().unwrap().script.contains("update-status"));
    }

    #[tokio::test]
    async fn pensamento_succeeds_and_echoes_text() {
        let state = test_state();
        let payload = pensamento(&state, "hora de trabalhar").await;
        assert_eq!(payload["success"], true);
        assert_eq!(payload["texto"], "hora de trabalhar");

        let drained = state.execute_queue.drain().await;
        assert!(drained.first().unwrap().script.contains("startDialogue"));
    }

    #[tokio::test]
    async fn generate_without_credential_returns_configuration_error() {
        let state = test_state();
        let payload = generate(&state, &[]).await;
        assert_eq!(payload["status_code"], 500);
        assert!(
            payload["error"]
                .as_str()
                .unwrap()
                .contains("GEMINI_API_KEY")
        );
    }
}
