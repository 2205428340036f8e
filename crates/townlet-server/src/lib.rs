//! HTTP and tool surfaces for the Townlet game bridge.
//!
//! The bridge sits between a browser-resident RPG and the Gemini API and
//! exposes game actions over two parallel front doors:
//!
//! - a **JSON HTTP API** (movement, status, dialogue, script queue,
//!   generation) consumed by the game page itself
//! - a **tool surface** (`/mcp/tools`) exposing the same operations as
//!   named tools with JSON-schema parameters, each returning a
//!   JSON-encoded string
//!
//! Both call the single shared operation layer in [`ops`], so no logic is
//! duplicated between surfaces.
//!
//! # Architecture
//!
//! Scripts for the browser travel through an outbound mailbox
//! ([`townlet_core::ScriptQueue`]) that the game page polls; the bridge
//! never pushes into the browser and never waits for it. Status reports
//! flow the other way into a last-writer-wins cache. All state is
//! in-memory and resets on restart.

pub mod config;
pub mod error;
pub mod gemini;
pub mod handlers;
pub mod notify;
pub mod ops;
pub mod router;
pub mod server;
pub mod state;
pub mod tools;

// Re-export primary types for convenience.
pub use config::{ConfigError, GeminiConfig, ServerConfig};
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
