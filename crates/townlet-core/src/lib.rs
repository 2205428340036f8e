//! Core components for the Townlet bridge.
//!
//! The bridge relays game actions between a browser-resident RPG and an
//! external generative API. This crate holds the leaf components that have
//! no HTTP surface of their own:
//!
//! - [`map`] -- the static town layout and the marker scanner that derives
//!   named destination coordinates from it
//! - [`status`] -- the player status record, its process-start defaults,
//!   and the last-writer-wins status cache
//! - [`queue`] -- the outbound script mailbox drained by the browser poller
//! - [`script`] -- builders for the JavaScript snippets injected into the
//!   browser through the mailbox
//!
//! Everything here is in-memory and resets on restart; there is no
//! persistence layer by design.

pub mod map;
pub mod queue;
pub mod script;
pub mod status;

// Re-export primary types for convenience.
pub use map::{GridPos, destinations, scan_markers};
pub use queue::{MAX_SCRIPT_AGE_SECS, QueuedScript, ScriptQueue};
pub use status::{PlayerStatus, StatusCache};
