//! Best-effort memoization wrapper over a [`CacheStore`].
//!
//! The cache exists to avoid repeat calls to metered external APIs for
//! identical requests inside the TTL window. It is memoization, not
//! durability: reads fail open to a miss and writes are background
//! best-effort, with failures logged rather than surfaced or swallowed.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::traits::CacheStore;

/// Default time-to-live for cached provider results.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Shared handle around a cache backend with fail-open semantics.
#[derive(Clone)]
pub struct MemoCache {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl MemoCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self::with_ttl(store, DEFAULT_TTL)
    }

    pub fn with_ttl(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// The TTL applied to writes.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Looks up `key`, treating any backend error as a miss.
    pub async fn get(&self, key: &str) -> Option<Value> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "cache lookup failed, treating as miss");
                None
            }
        }
    }

    /// Upserts `key` without blocking the caller.
    ///
    /// The write runs in a spawned task; a failure is logged at `warn` and
    /// the already-computed response is unaffected.
    pub fn put_background(&self, key: impl Into<String>, value: Value) {
        let store = Arc::clone(&self.store);
        let ttl = self.ttl;
        let key = key.into();
        tokio::spawn(async move {
            if let Err(e) = store.put(&key, value, ttl).await {
                tracing::warn!(key, error = %e, "cache write failed");
            }
        });
    }

    /// Awaited upsert for in-crate tests; request paths write through
    /// [`MemoCache::put_background`]. Failures are still only logged.
    #[cfg(test)]
    pub(crate) async fn put(&self, key: &str, value: Value) {
        if let Err(e) = self.store.put(key, value, self.ttl).await {
            tracing::warn!(key, error = %e, "cache write failed");
        }
    }
}

impl std::fmt::Debug for MemoCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoCache").field("ttl", &self.ttl).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    struct MapCache {
        entries: Mutex<HashMap<String, Value>>,
    }

    impl MapCache {
        fn new() -> Self {
            Self {
                entries: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl CacheStore for MapCache {
        async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
            Ok(self.entries.lock().await.get(key).cloned())
        }

        async fn put(
            &self,
            key: &str,
            value: Value,
            _ttl: Duration,
        ) -> Result<(), StorageError> {
            self.entries.lock().await.insert(key.to_string(), value);
            Ok(())
        }
    }

    struct BrokenCache;

    #[async_trait]
    impl CacheStore for BrokenCache {
        async fn get(&self, _key: &str) -> Result<Option<Value>, StorageError> {
            Err(StorageError::connection("cache store unreachable"))
        }

        async fn put(
            &self,
            _key: &str,
            _value: Value,
            _ttl: Duration,
        ) -> Result<(), StorageError> {
            Err(StorageError::connection("cache store unreachable"))
        }
    }

    #[tokio::test]
    async fn test_get_after_put_returns_value() {
        let cache = MemoCache::new(Arc::new(MapCache::new()));
        cache.put("geocode:NYC", json!({"lat": 40.7})).await;
        let hit = cache.get("geocode:NYC").await;
        assert_eq!(hit.unwrap()["lat"], 40.7);
    }

    #[tokio::test]
    async fn test_lookup_error_fails_open_to_miss() {
        let cache = MemoCache::new(Arc::new(BrokenCache));
        assert!(cache.get("anything").await.is_none());
    }

    #[tokio::test]
    async fn test_write_error_does_not_panic() {
        let cache = MemoCache::new(Arc::new(BrokenCache));
        cache.put("k", json!(1)).await;
        cache.put_background("k", json!(2));
        // Give the spawned write a chance to run (and log) before the
        // runtime shuts down.
        tokio::task::yield_now().await;
    }

    #[tokio::test]
    async fn test_background_put_is_visible() {
        let backend = Arc::new(MapCache::new());
        let cache = MemoCache::new(backend.clone());
        cache.put_background("verify:img", json!({"verification": "ok"}));

        // Wait for the spawned task to complete.
        for _ in 0..100 {
            if cache.get("verify:img").await.is_some() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        panic!("background write never landed");
    }
}
