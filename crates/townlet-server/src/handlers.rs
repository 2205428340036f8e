//! HTTP endpoint handlers for the bridge server.
//!
//! Handlers are thin: request fields are pulled out of generic JSON
//! bodies, the shared [`crate::ops`] layer does the work, and the payload
//! goes back as-is. Operation failures travel inside 200 responses as
//! structured payloads; only missing or empty required fields (400),
//! unknown tools (404) and the missing game page (404) become HTTP error
//! statuses.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Static game page from disk |
//! | `GET` | `/api/config` | Upstream credential availability |
//! | `GET` | `/api/destinations` | Scanned destination coordinates |
//! | `POST` | `/api/player/move` | Trigger movement |
//! | `GET` | `/api/player/status` | Status (capture queued + cached) |
//! | `POST` | `/api/player/pensamento` | Thought bubble |
//! | `GET` | `/api/player/real-status` | Tagged capture + placeholder |
//! | `GET` | `/api/player/live-status` | Capture + cached |
//! | `GET` | `/api/player/request-status` | Request script + cached |
//! | `POST` | `/api/player/update-status` | Overwrite the status cache |
//! | `GET` | `/api/player/current-status` | Cached status only |
//! | `POST` | `/api/execute-js` | Enqueue an arbitrary script |
//! | `GET` | `/api/js-commands` | Drain the execute queue |
//! | `POST` | `/api/gemini/generate` | Forward to the Gemini API |
//! | `GET` | `/api/test-js` | Enqueue a diagnostic probe |
//! | `GET` | `/mcp/tools` | List tool definitions |
//! | `POST` | `/mcp/tools/{name}` | Invoke a tool |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use serde_json::Value;

use townlet_core::{PlayerStatus, script};

use crate::error::ApiError;
use crate::gemini::{self, GeminiError, Message};
use crate::ops;
use crate::state::AppState;
use crate::tools;

/// Extract a required string field from a generic JSON body.
///
/// An empty string counts as missing, same as an absent or wrong-typed
/// field.
fn require_str<'a>(body: &'a Value, field: &'static str) -> Result<&'a str, ApiError> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .ok_or(ApiError::MissingField(field))
}

// ---------------------------------------------------------------------------
// GET / -- static game page
// ---------------------------------------------------------------------------

/// Serve the game page from disk; 404 when the file is missing.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let page = tokio::fs::read_to_string(&state.game_page)
        .await
        .map_err(|e| ApiError::NotFound(format!("game file not found: {e}")))?;
    Ok(Html(page))
}

// ---------------------------------------------------------------------------
// Config and destinations
// ---------------------------------------------------------------------------

/// `GET /api/config`
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(ops::get_config(&state))
}

/// `GET /api/destinations`
pub async fn get_destinations() -> Json<Value> {
    Json(ops::get_destinations())
}

// ---------------------------------------------------------------------------
// Player movement and dialogue
// ---------------------------------------------------------------------------

/// `POST /api/player/move` -- body requires `destination`.
pub async fn move_player(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let destination = require_str(&body, "destination")?;
    Ok(Json(ops::move_player(&state, destination).await))
}

/// `POST /api/player/pensamento` -- body requires `texto`.
pub async fn pensamento(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let texto = require_str(&body, "texto")?;
    Ok(Json(ops::pensamento(&state, texto).await))
}

// ---------------------------------------------------------------------------
// Player status family
// ---------------------------------------------------------------------------

/// `GET /api/player/status` -- capture queued, cached snapshot returned.
pub async fn player_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(ops::get_player_status(&state).await)
}

/// `POST /api/player/update-status` -- overwrite the cache when the
/// `player_status` key is present; always reports success.
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    if let Some(status) = body.get("player_status") {
        state.status.replace(status.clone()).await;
    }
    Json(serde_json::json!({"success": true, "message": "status updated"}))
}

/// `GET /api/player/current-status` -- cached status only.
pub async fn current_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(serde_json::json!({"player_status": state.status.snapshot().await}))
}

/// `GET /api/player/real-status` -- tagged capture on the side channel,
/// placeholder defaults returned with a `nota` marker.
pub async fn real_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    state
        .capture_queue
        .push_tagged(script::status_capture())
        .await;

    let mut placeholder = PlayerStatus::default_value();
    if let Value::Object(fields) = &mut placeholder {
        fields.insert(
            String::from("nota"),
            Value::String(String::from("requesting live status from the browser")),
        );
    }
    Json(serde_json::json!({"player_status": placeholder}))
}

/// `GET /api/player/live-status` -- capture on the execute queue, cached
/// snapshot returned (eventually consistent).
pub async fn live_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    state.notifier.dispatch(script::status_capture()).await;
    Json(serde_json::json!({
        "status": "success",
        "player_status": state.status.snapshot().await,
    }))
}

/// `GET /api/player/request-status` -- request script on the side
/// channel, cached snapshot returned.
pub async fn request_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    state.capture_queue.push(script::status_request()).await;
    Json(serde_json::json!({
        "status": "success",
        "message": "status report requested from the browser",
        "player_status": state.status.snapshot().await,
    }))
}

// ---------------------------------------------------------------------------
// Script queue surface
// ---------------------------------------------------------------------------

/// `POST /api/execute-js` -- body requires `script`.
pub async fn execute_js(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let script = require_str(&body, "script")?;
    state.execute_queue.push(script.to_owned()).await;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "script queued for execution",
    })))
}

/// `GET /api/js-commands` -- drain the execute queue.
pub async fn js_commands(State(state): State<Arc<AppState>>) -> Json<Value> {
    let commands = state.execute_queue.drain().await;
    Json(serde_json::json!({"commands": commands}))
}

/// `GET /api/test-js` -- tagged diagnostic probe on the side channel.
pub async fn test_js(State(state): State<Arc<AppState>>) -> Json<Value> {
    let id = state
        .capture_queue
        .push_tagged(script::diagnostic_probe())
        .await;
    Json(serde_json::json!({
        "message": "diagnostic script queued",
        "check_console": "inspect the browser console for probe output",
        "id": id,
    }))
}

// ---------------------------------------------------------------------------
// Gemini generation
// ---------------------------------------------------------------------------

/// `POST /api/gemini/generate` -- body requires a non-empty `contents`.
///
/// Shape errors in `contents` map to the 400-class payload; all upstream
/// outcomes come back as payloads with an HTTP 200.
pub async fn gemini_generate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let contents = body.get("contents").ok_or(ApiError::MissingField("contents"))?;
    let empty = contents.is_null()
        || contents.as_array().is_some_and(Vec::is_empty)
        || contents.as_str().is_some_and(str::is_empty);
    if empty {
        return Err(ApiError::MissingField("contents"));
    }

    let payload = match serde_json::from_value::<Vec<Message>>(contents.clone()) {
        Ok(turns) => ops::generate(&state, &turns).await,
        Err(e) => gemini::error_payload(&GeminiError::InvalidInput(e.to_string())),
    };
    Ok(Json(payload))
}

// ---------------------------------------------------------------------------
// Tool surface
// ---------------------------------------------------------------------------

/// `GET /mcp/tools` -- list tool definitions.
pub async fn list_tools() -> Json<Value> {
    Json(serde_json::json!({"tools": tools::tool_definitions()}))
}

/// `POST /mcp/tools/{name}` -- invoke a tool with a JSON object of
/// arguments; the response body is the tool's JSON-encoded string.
pub async fn invoke_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(args): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let result = tools::call_tool(&state, &name, &args).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], result))
}
