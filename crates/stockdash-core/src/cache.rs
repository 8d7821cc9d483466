//! Snapshot cache keyed by (symbol, start, end)
//!
//! Explicit replacement for framework-level memoization: TTL eviction via
//! `cached::TimedCache`, with miss handling serialized so overlapping
//! invocations cannot duplicate upstream fetches.

use crate::model::Query;
use cached::{Cached, TimedCache};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// Cache key for one loader invocation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotKey {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl From<&Query> for SnapshotKey {
    fn from(query: &Query) -> Self {
        Self {
            symbol: query.symbol().to_string(),
            start: query.start(),
            end: query.end(),
        }
    }
}

/// Thread-safe TTL cache for market snapshots
pub struct SnapshotCache<V> {
    cache: Arc<RwLock<TimedCache<SnapshotKey, V>>>,
    fetch_lock: Arc<Mutex<()>>,
}

impl<V: Clone> SnapshotCache<V> {
    /// Create a new cache with the specified TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
            fetch_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Get a value from the cache
    pub async fn get(&self, key: &SnapshotKey) -> Option<V> {
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    /// Insert a value into the cache
    pub async fn insert(&self, key: SnapshotKey, value: V) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, value);
    }

    /// Get or fetch a value using the provided fetcher function.
    ///
    /// On a hit the fetcher is never invoked. On a miss the fetcher runs
    /// under the fetch lock, and the cache is re-checked after the lock is
    /// acquired, so at most one fetch per key is ever in flight. Fetch
    /// errors propagate and are never cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: SnapshotKey, fetcher: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key).await {
            tracing::debug!(symbol = %key.symbol, "cache hit");
            return Ok(value);
        }

        let _guard = self.fetch_lock.lock().await;

        // A concurrent invocation may have filled the entry while we
        // waited for the lock.
        if let Some(value) = self.get(&key).await {
            tracing::debug!(symbol = %key.symbol, "cache hit after wait");
            return Ok(value);
        }

        tracing::debug!(symbol = %key.symbol, "cache miss");

        let value = fetcher().await?;
        self.insert(key, value.clone()).await;

        Ok(value)
    }

    /// Invalidate a specific cache entry
    pub async fn invalidate(&self, key: &SnapshotKey) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_remove(key);
    }

    /// Clear all cached entries
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    /// Get the number of cached entries
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    /// Check if the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<V> Clone for SnapshotCache<V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            fetch_lock: Arc::clone(&self.fetch_lock),
        }
    }
}
