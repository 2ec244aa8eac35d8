//! Cache collaborator: short-lived key/value storage for computed snapshots.
//!
//! Every operation is best effort. A cache that is down behaves like one
//! that always misses, and a failed write is reported but never fatal.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::utils::app_time::{self, AppInstant};

#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// `None` on a miss, on expiry, or when the cache cannot be reached.
    async fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// `true` when the value was stored.
    async fn set(&self, key: &str, value: Vec<u8>, ttl_secs: u64) -> bool;

    fn signature(&self) -> &'static str;
}

/// Decode a JSON payload. An undecodable entry counts as a miss.
pub async fn get_json<T: DeserializeOwned>(cache: &dyn KeyValueCache, key: &str) -> Option<T> {
    let bytes = cache.get(key).await?;
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring undecodable cache entry {}: {}", key, e);
            None
        }
    }
}

pub async fn set_json<T: Serialize + Sync>(
    cache: &dyn KeyValueCache,
    key: &str,
    value: &T,
    ttl_secs: u64,
) -> bool {
    match serde_json::to_vec(value) {
        Ok(bytes) => cache.set(key, bytes, ttl_secs).await,
        Err(e) => {
            log::warn!("Failed to encode cache entry {}: {}", key, e);
            false
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    bytes: Vec<u8>,
    expires_at: AppInstant,
}

/// Process-local TTL cache. Clones share storage.
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Run on every write. Keys vary with limit, lookback and sensitivity, so
// entries that are never read again would otherwise pile up.
fn drop_expired(entries: &mut HashMap<String, CacheEntry>, now: AppInstant) {
    entries.retain(|_, entry| entry.expires_at > now);
}

#[async_trait]
impl KeyValueCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut entries = self.entries.lock().ok()?;
        let fresh = entries
            .get(key)
            .filter(|entry| entry.expires_at > app_time::now())
            .map(|entry| entry.bytes.clone());
        if fresh.is_none() {
            entries.remove(key);
        }
        fresh
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl_secs: u64) -> bool {
        let Ok(mut entries) = self.entries.lock() else {
            return false;
        };
        let now = app_time::now();
        drop_expired(&mut entries, now);
        entries.insert(
            key.to_string(),
            CacheEntry {
                bytes: value,
                expires_at: now + Duration::from_secs(ttl_secs),
            },
        );
        true
    }

    fn signature(&self) -> &'static str {
        "Memory Cache"
    }
}

/// Cache that never stores anything. Stands in when no cache is configured.
#[derive(Clone, Copy, Default)]
pub struct NoCache;

#[async_trait]
impl KeyValueCache for NoCache {
    async fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    async fn set(&self, _key: &str, _value: Vec<u8>, _ttl_secs: u64) -> bool {
        false
    }

    fn signature(&self) -> &'static str {
        "No Cache"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_returns_bytes() {
        let cache = MemoryCache::new();
        assert!(cache.set("k", b"abc".to_vec(), 60).await);
        assert_eq!(cache.get("k").await, Some(b"abc".to_vec()));
        assert_eq!(cache.get("other").await, None);
    }

    #[tokio::test]
    async fn zero_ttl_expires_immediately() {
        let cache = MemoryCache::new();
        cache.set("k", b"abc".to_vec(), 0).await;
        assert_eq!(cache.get("k").await, None);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn writes_evict_expired_keys() {
        let cache = MemoryCache::new();
        cache.set("ohlc:BTC/USD:1h:100", vec![1], 0).await;
        cache.set("ohlc:BTC/USD:1h:200", vec![2], 0).await;
        cache.set("ohlc:BTC/USD:1h:300", vec![3], 600).await;
        // the two expired keys were never read again
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let cache = MemoryCache::new();
        let other = cache.clone();
        other.set("k", vec![7], 60).await;
        assert_eq!(cache.get("k").await, Some(vec![7]));
    }

    #[tokio::test]
    async fn json_helpers_treat_garbage_as_miss() {
        let cache = MemoryCache::new();
        assert!(set_json(&cache, "nums", &vec![1.5, 2.5], 60).await);
        let back: Option<Vec<f64>> = get_json(&cache, "nums").await;
        assert_eq!(back, Some(vec![1.5, 2.5]));

        cache.set("bad", b"not json".to_vec(), 60).await;
        let bad: Option<Vec<f64>> = get_json(&cache, "bad").await;
        assert_eq!(bad, None);
    }

    #[tokio::test]
    async fn no_cache_never_hits() {
        let cache = NoCache;
        assert!(!cache.set("k", vec![1], 60).await);
        assert_eq!(cache.get("k").await, None);
    }
}
