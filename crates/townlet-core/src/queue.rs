//! Outbound script mailbox drained by the browser poller.
//!
//! The bridge cannot push into the browser; the game page polls for
//! pending scripts instead. Producers append entries, the poller drains
//! the whole queue atomically. Entries that sat in the queue for longer
//! than [`MAX_SCRIPT_AGE_SECS`] are dropped at drain time -- a poller
//! that was away for a while must not replay a backlog of stale scripts.
//!
//! This is a best-effort mailbox, not a command protocol: there are no
//! acknowledgments and no delivery guarantee beyond "the next drain sees
//! everything enqueued since the previous one, at most once".

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Entries older than this many seconds are dropped at drain time.
pub const MAX_SCRIPT_AGE_SECS: i64 = 30;

/// A pending script payload with its enqueue time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuedScript {
    /// Correlation id, present only for tagged entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// The opaque script text the browser will evaluate.
    pub script: String,
    /// Enqueue time, serialized as epoch seconds for the poller.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
}

/// FIFO mailbox of pending scripts.
///
/// Clones share the same underlying queue. Growth between drains is
/// unbounded; eviction happens only when a drain snapshots the queue.
#[derive(Debug, Clone, Default)]
pub struct ScriptQueue {
    entries: Arc<Mutex<Vec<QueuedScript>>>,
}

impl ScriptQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a script with the current timestamp and no id.
    pub async fn push(&self, script: String) {
        self.push_at(script, None, Utc::now()).await;
    }

    /// Append a script with the current timestamp and a fresh
    /// correlation id, returning the id.
    pub async fn push_tagged(&self, script: String) -> Uuid {
        let id = Uuid::new_v4();
        self.push_at(script, Some(id), Utc::now()).await;
        id
    }

    /// Append a script with an explicit timestamp.
    pub async fn push_at(&self, script: String, id: Option<Uuid>, timestamp: DateTime<Utc>) {
        self.entries.lock().await.push(QueuedScript {
            id,
            script,
            timestamp,
        });
    }

    /// Atomically take the entire queue, then drop entries older than
    /// [`MAX_SCRIPT_AGE_SECS`] from the snapshot before returning it.
    /// The cutoff is inclusive: an entry aged exactly
    /// [`MAX_SCRIPT_AGE_SECS`] seconds at drain time is still delivered.
    ///
    /// Every entry is observed by at most one drain; a second drain with
    /// no pushes in between returns an empty list.
    pub async fn drain(&self) -> Vec<QueuedScript> {
        let snapshot = {
            let mut entries = self.entries.lock().await;
            std::mem::take(&mut *entries)
        };
        let cutoff = Utc::now() - Duration::seconds(MAX_SCRIPT_AGE_SECS);
        snapshot
            .into_iter()
            .filter(|entry| entry.timestamp >= cutoff)
            .collect()
    }

    /// Number of entries currently pending.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the queue currently holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
