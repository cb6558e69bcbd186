//! Read-through response cache.
//!
//! The cache is infallible from the caller's point of view: a backend that
//! is missing, unreachable, or failing behaves exactly like a cache with no
//! entries, and the pipeline silently recomputes. Invalidation is done by
//! overwriting the entry with a near-zero TTL rather than deleting it.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

/// Cache key for a host's score response.
#[must_use]
pub fn cache_key(host: &str) -> String {
    format!("site:{host}")
}

/// TTL'd JSON key-value cache.
#[async_trait]
pub trait ScoreCache: Send + Sync {
    /// Value stored under `key`, if present and unexpired.
    async fn get_json(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key` for `ttl`. Best-effort; never errors.
    async fn set_json(&self, key: &str, value: Value, ttl: Duration);
}

struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// In-memory TTL cache.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScoreCache for MemoryCache {
    async fn get_json(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.expires_at <= Instant::now() {
            return None;
        }
        Some(entry.value.clone())
    }

    async fn set_json(&self, key: &str, value: Value, ttl: Duration) {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: now + ttl,
            },
        );
    }
}

/// Cache that stores nothing: the "no cache backend configured" mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

#[async_trait]
impl ScoreCache for NoopCache {
    async fn get_json(&self, _key: &str) -> Option<Value> {
        None
    }

    async fn set_json(&self, _key: &str, _value: Value, _ttl: Duration) {}
}
