use artistfeed_core::SearchResult;
use std::sync::Arc;
use tokio::time::{Duration, Instant};

/// A stored search result and when it was written.
#[derive(Debug, Clone)]
pub struct CachedSearch {
    pub payload: Arc<SearchResult>,
    pub stored_at: Instant,
}

impl CachedSearch {
    pub fn new(payload: Arc<SearchResult>) -> Self {
        Self {
            payload,
            stored_at: Instant::now(),
        }
    }
}

/// Result of looking a key up. `fresh` is false once the entry outlived the TTL.
#[derive(Debug, Clone)]
pub struct CacheLookup {
    pub payload: Arc<SearchResult>,
    pub fresh: bool,
}

/// What a search produced and whether it came straight from the cache.
#[derive(Debug, Clone)]
pub struct CacheOutcome {
    pub result: Arc<SearchResult>,
    pub cached: bool,
}

pub fn is_cache_valid(stored_at: Instant, ttl: Duration) -> bool {
    stored_at.elapsed() < ttl
}
