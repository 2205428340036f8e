//! Axum router construction for the bridge API.
//!
//! Assembles the HTTP surface and the tool surface into a single
//! [`Router`] with CORS middleware enabled so the game page can call the
//! API from any origin during development.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete router for the bridge server.
///
/// Both surfaces share the same [`AppState`] and the same operation
/// layer; the tool routes are just a second front door.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Game page
        .route("/", get(handlers::index))
        // REST API
        .route("/api/config", get(handlers::get_config))
        .route("/api/destinations", get(handlers::get_destinations))
        .route("/api/player/move", post(handlers::move_player))
        .route("/api/player/status", get(handlers::player_status))
        .route("/api/player/pensamento", post(handlers::pensamento))
        .route("/api/player/real-status", get(handlers::real_status))
        .route("/api/player/live-status", get(handlers::live_status))
        .route("/api/player/request-status", get(handlers::request_status))
        .route("/api/player/update-status", post(handlers::update_status))
        .route("/api/player/current-status", get(handlers::current_status))
        .route("/api/execute-js", post(handlers::execute_js))
        .route("/api/js-commands", get(handlers::js_commands))
        .route("/api/gemini/generate", post(handlers::gemini_generate))
        .route("/api/test-js", get(handlers::test_js))
        // Tool surface
        .route("/mcp/tools", get(handlers::list_tools))
        .route("/mcp/tools/{name}", post(handlers::invoke_tool))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
