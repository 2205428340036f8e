//! Fire-and-forget script delivery toward the browser.
//!
//! The browser cannot be pushed to directly; "notifying" it means
//! dropping a script into the outbound mailbox the game page polls.
//! A dispatch never fails the caller: the push is an in-memory append,
//! and actual delivery happens whenever the next poll drains the queue.
//! Callers must treat anything driven this way as eventually consistent.

use townlet_core::ScriptQueue;

/// Non-blocking sender into the outbound script mailbox.
#[derive(Debug, Clone)]
pub struct FrontendNotifier {
    mailbox: ScriptQueue,
}

impl FrontendNotifier {
    /// Wrap the queue the browser poller drains.
    pub const fn new(mailbox: ScriptQueue) -> Self {
        Self { mailbox }
    }

    /// Queue a script for the next poll.
    ///
    /// At-most-once, no acknowledgment, no retry. The caller's success
    /// response must never depend on this reaching the browser.
    pub async fn dispatch(&self, script: String) {
        tracing::debug!(script_len = script.len(), "frontend script queued");
        self.mailbox.push(script).await;
    }
}
