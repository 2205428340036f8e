//! Player status record and the last-known-status cache.
//!
//! The browser reports its status wholesale; the bridge never merges or
//! validates, it just keeps the most recent complete record. Readers
//! always see either the previous snapshot or the new one, never a mix.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::map::GridPos;

/// The player status record as the browser reports it.
///
/// Field names are the wire contract with the game page and the tool
/// surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatus {
    /// Remaining stamina.
    pub stamina: i64,
    /// Money carried in the pocket.
    pub dinheiro_bolso: i64,
    /// Money deposited at the bank.
    pub dinheiro_banco: i64,
    /// Current grid position.
    pub coordenadas: GridPos,
    /// Named location the player currently stands on.
    pub localizacao_atual: String,
    /// Number of cars owned.
    pub carros: i64,
}

impl Default for PlayerStatus {
    fn default() -> Self {
        Self {
            stamina: 100,
            dinheiro_bolso: 0,
            dinheiro_banco: 0,
            coordenadas: GridPos { x: 1, y: 1 },
            localizacao_atual: String::from("casa"),
            carros: 0,
        }
    }
}

impl PlayerStatus {
    /// The default status as a raw JSON value.
    pub fn default_value() -> Value {
        serde_json::to_value(Self::default()).unwrap_or(Value::Null)
    }
}

/// Last-writer-wins cache of the most recent status report.
///
/// The cached value is raw JSON on purpose: updates from the browser are
/// accepted without schema validation and overwritten wholesale, exactly
/// as received. The lock guarantees readers observe a complete record.
#[derive(Debug, Clone)]
pub struct StatusCache {
    inner: Arc<RwLock<Value>>,
}

impl StatusCache {
    /// Create a cache seeded with [`PlayerStatus::default`].
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(PlayerStatus::default_value())),
        }
    }

    /// Return a complete copy of the cached status.
    pub async fn snapshot(&self) -> Value {
        self.inner.read().await.clone()
    }

    /// Replace the cached status wholesale.
    pub async fn replace(&self, status: Value) {
        *self.inner.write().await = status;
    }
}

impl Default for StatusCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn default_status_matches_process_start_values() {
        let status = PlayerStatus::default();
        assert_eq!(status.stamina, 100);
        assert_eq!(status.dinheiro_bolso, 0);
        assert_eq!(status.dinheiro_banco, 0);
        assert_eq!(status.coordenadas, GridPos { x: 1, y: 1 });
        assert_eq!(status.localizacao_atual, "casa");
        assert_eq!(status.carros, 0);
    }

    #[tokio::test]
    async fn cache_starts_with_defaults() {
        let cache = StatusCache::new();
        let snapshot = cache.snapshot().await;
        assert_eq!(snapshot["stamina"], 100);
        assert_eq!(snapshot["localizacao_atual"], "casa");
    }

    #[tokio::test]
    async fn replace_overwrites_wholesale() {
        let cache = StatusCache::new();
        // Deliberately a different shape: the cache must not merge or
        // validate, only swap.
        let update = serde_json::json!({"stamina": 42, "extra": true});
        cache.replace(update.clone()).await;
        assert_eq!(cache.snapshot().await, update);
    }

    #[tokio::test]
    async fn last_writer_wins() {
        let cache = StatusCache::new();
        cache.replace(serde_json::json!({"stamina": 1})).await;
        cache.replace(serde_json::json!({"stamina": 2})).await;
        assert_eq!(cache.snapshot().await["stamina"], 2);
    }
}
