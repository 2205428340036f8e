//! The tool-invocation surface.
//!
//! Exposes the same operations as the HTTP API under stable tool names,
//! each described by a JSON-schema parameter object and each returning a
//! JSON-encoded string. Dispatch goes straight into [`crate::ops`]; no
//! logic lives here.

use serde::Serialize;
use serde_json::Value;

use crate::gemini::{self, GeminiError, Message};
use crate::ops;
use crate::state::AppState;

/// Description of one callable tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// Stable tool name used for dispatch.
    pub name: String,
    /// Human-readable description shown to the model.
    pub description: String,
    /// JSON-schema object describing the arguments.
    pub parameters: Value,
}

/// Errors from tool dispatch itself (operation failures are returned as
/// payloads, not as these).
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// No tool is registered under the requested name.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// A required argument was absent, empty, or not a string.
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    /// The operation payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The definitions of every registered tool.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: String::from("get_config"),
            description: String::from(
                "Report whether the Gemini API credential is configured on the bridge",
            ),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        ToolDefinition {
            name: String::from("get_destinations"),
            description: String::from(
                "Return the named destination coordinates scanned from the town map",
            ),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        ToolDefinition {
            name: String::from("generate_gemini_content"),
            description: String::from(
                "Call the Gemini API with a JSON-encoded list of role-tagged message turns",
            ),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "contents_json": {
                        "type": "string",
                        "description": "JSON-encoded array of {role, parts: [{text}]} turns"
                    }
                },
                "required": ["contents_json"]
            }),
        },
        ToolDefinition {
            name: String::from("move_player"),
            description: String::from(
                "Move the player toward a named destination using browser-side pathfinding",
            ),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "destination": {
                        "type": "string",
                        "description": "Destination name (casa, trabalho, mercado, banco, loja_carros)"
                    }
                },
                "required": ["destination"]
            }),
        },
        ToolDefinition {
            name: String::from("get_player_status"),
            description: String::from(
                "Return the last known player status (stamina, money, position, location)",
            ),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        ToolDefinition {
            name: String::from("pensamento"),
            description: String::from(
                "Show a thought bubble with the given text above the player",
            ),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "texto": {
                        "type": "string",
                        "description": "The thought text to display"
                    }
                },
                "required": ["texto"]
            }),
        },
    ]
}

/// Invoke a tool by name with a JSON object of arguments.
///
/// Returns the operation payload as a JSON-encoded string, mirroring the
/// HTTP responses. Operation failures (unknown destination, upstream
/// errors) come back inside that string; only dispatch problems surface
/// as [`ToolError`].
pub async fn call_tool(state: &AppState, name: &str, args: &Value) -> Result<String, ToolError> {
    let payload = match name {
        "get_config" => ops::get_config(state),
        "get_destinations" => ops::get_destinations(),
        "move_player" => {
            let destination = require_str(args, "destination")?;
            ops::move_player(state, destination).await
        }
        "get_player_status" => ops::get_player_status(state).await,
        "pensamento" => {
            let texto = require_str(args, "texto")?;
            ops::pensamento(state, texto).await
        }
        "generate_gemini_content" => {
            let contents_json = require_str(args, "contents_json")?;
            match serde_json::from_str::<Vec<Message>>(contents_json) {
                Ok(contents) if !contents.is_empty() => ops::generate(state, &contents).await,
                Ok(_) => gemini::error_payload(&GeminiError::InvalidInput(String::from(
                    "contents must be a non-empty array of message turns",
                ))),
                Err(e) => gemini::error_payload(&GeminiError::InvalidInput(e.to_string())),
            }
        }
        other => return Err(ToolError::UnknownTool(other.to_owned())),
    };

    Ok(serde_json::to_string(&payload)?)
}

/// Extract a required string argument; an empty string counts as missing.
fn require_str<'a>(args: &'a Value, name: &'static str) -> Result<&'a str, ToolError> {
    args.get(name)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .ok_or(ToolError::MissingArgument(name))
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
    fn registry_lists_six_tools() {
        let definitions = tool_definitions();
        assert_eq!(definitions.len(), 6);
        let names: Vec<&str> = definitions.iter().map(|d| d.name.as_str()).collect();
        assert!(names.contains(&"move_player"));
        assert!(names.contains(&"generate_gemini_content"));
        assert!(names.contains(&"pensamento"));
    }

    #[tokio::test]
    async fn tool_results_are_json_strings() {
        let state = test_state();
        let result = call_tool(&state, "get_destinations", &serde_json::json!({}))
            .await
            .unwrap();
        let payload: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(payload["destinations"]["casa"]["x"], 9);
    }

    #[tokio::test]
    async fn tool_and_http_share_one_implementation() {
        let state = test_state();
        let via_tool = call_tool(
            &state,
            "move_player",
            &serde_json::json!({"destination": "banco"}),
        )
        .await
        .unwrap();
        let via_ops = ops::move_player(&state, "banco").await;
        assert_eq!(serde_json::from_str::<Value>(&via_tool).unwrap(), via_ops);
    }

    #[tokio::test]
    async fn unknown_tool_is_rejected() {
        let state = test_state();
        let result = call_tool(&state, "fly_player", &serde_json::json!({})).await;
        assert!(matches!(result, Err(ToolError::UnknownTool(_))));
    }

    #[tokio::test]
    async fn missing_argument_is_rejected() {
        let state = test_state();
        let result = call_tool(&state, "pensamento", &serde_json::json!({})).await;
        assert!(matches!(result, Err(ToolError::MissingArgument("texto"))));
    }

    #[tokio::test]
    async fn empty_argument_is_rejected() {
        let state = test_state();
        let result = call_tool(&state, "pensamento", &serde_json::json!({"texto": ""})).await;
        assert!(matches!(result, Err(ToolError::MissingArgument("texto"))));
    }

    #[tokio::test]
    async fn empty_contents_array_maps_to_bad_input_payload() {
        let state = test_state();
        let result = call_tool(
            &state,
            "generate_gemini_content",
            &serde_json::json!({"contents_json": "[]"}),
        )
        .await
        .unwrap();
        let payload: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(payload["status_code"], 400);
    }

    #[tokio::test]
    async fn malformed_contents_json_maps_to_bad_input_payload() {
        let state = test_state();
        let result = call_tool(
            &state,
            "generate_gemini_content",
            &serde_json::json!({"contents_json": "not json"}),
        )
        .await
        .unwrap();
        let payload: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(payload["status_code"], 400);
    }
}
