use crate::cache::types::{CacheLookup, CachedSearch, is_cache_valid};
use artistfeed_core::SearchResult;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{Duration, interval};

/// Process-wide map from cache key to search result.
///
/// Writes overwrite unconditionally. Stale entries stay readable (with
/// `fresh == false`) until a sweep removes them.
#[derive(Clone)]
pub struct CacheStorage {
    cache: Arc<RwLock<FxHashMap<String, CachedSearch>>>,
    ttl: Duration,
}

impl CacheStorage {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(FxHashMap::default())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self, key: &str) -> Option<CacheLookup> {
        let cache = self.cache.read().await;
        cache.get(key).map(|entry| CacheLookup {
            payload: entry.payload.clone(),
            fresh: is_cache_valid(entry.stored_at, self.ttl),
        })
    }

    /// Payload for `key` only if it is still within the TTL.
    pub async fn get_fresh(&self, key: &str) -> Option<Arc<SearchResult>> {
        self.get(key)
            .await
            .filter(|lookup| lookup.fresh)
            .map(|lookup| lookup.payload)
    }

    pub async fn insert(&self, key: String, payload: Arc<SearchResult>) {
        let mut cache = self.cache.write().await;
        cache.insert(key, CachedSearch::new(payload));
    }

    /// Drops every entry at least `ttl` old and returns how many went.
    pub async fn sweep(&self, ttl: Duration) -> usize {
        let mut cache = self.cache.write().await;
        let before = cache.len();
        cache.retain(|_, entry| is_cache_valid(entry.stored_at, ttl));
        before - cache.len()
    }

    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.read().await.is_empty()
    }

    pub fn start_periodic_sweeps(&self, every: Duration) -> JoinHandle<()> {
        let storage_clone = self.clone();
        tokio::spawn(async move {
            storage_clone.periodic_sweep_task(every).await;
        })
    }

    async fn periodic_sweep_task(&self, every: Duration) {
        let mut interval = interval(every);
        // first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;

            let removed = self.sweep(self.ttl).await;
            if removed > 0 {
                tracing::debug!(removed, "Swept expired search results");
            }
        }
    }
}
