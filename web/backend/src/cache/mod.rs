//! Search result cache service.
//!
//! One [`SearchCache`] is built at startup and shared by every request. It
//! answers from [`CacheStorage`] while entries are fresh, otherwise runs the
//! plan through [`PlanExecutor`]. Concurrent misses on one key share a single
//! upstream fetch. After each response the next page is warmed in a detached
//! task, and expired entries are swept both on a timer and at random after
//! misses.

pub mod fetcher;
pub mod storage;
pub mod types;

use crate::cache::fetcher::PlanExecutor;
use crate::cache::storage::CacheStorage;
use crate::cache::types::CacheOutcome;
use crate::config::{CACHE_TTL, Config};
use crate::saavn::ArtistSource;
use artistfeed_core::{QueryPlan, SearchError, SearchResult};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

type SharedFetch = Shared<BoxFuture<'static, Result<Arc<SearchResult>, SearchError>>>;

#[derive(Clone)]
pub struct SearchCache {
    storage: CacheStorage,
    executor: PlanExecutor,
    in_flight: Arc<Mutex<FxHashMap<String, SharedFetch>>>,
    sweep_probability: f64,
    sweeper: Arc<std::sync::Mutex<Option<JoinHandle<()>>>>,
}

impl SearchCache {
    pub fn new(source: Arc<dyn ArtistSource>, config: &Config) -> Self {
        Self {
            storage: CacheStorage::new(CACHE_TTL),
            executor: PlanExecutor::new(source, config.page_size, config.upstream_timeout),
            in_flight: Arc::new(Mutex::new(FxHashMap::default())),
            sweep_probability: config.sweep_probability.clamp(0.0, 1.0),
            sweeper: Arc::new(std::sync::Mutex::new(None)),
        }
    }

    /// Answers `plan` from the cache or the upstream source.
    pub async fn search(&self, plan: &QueryPlan) -> Result<CacheOutcome, SearchError> {
        let key = plan.cache_key();

        if let Some(result) = self.storage.get_fresh(&key).await {
            debug!(key = %key, "Cache hit");
            return Ok(CacheOutcome {
                result,
                cached: true,
            });
        }

        debug!(key = %key, fan_out = plan.merge_required, "Cache miss");
        let result = self.load_shared(key, plan.clone()).await?;
        self.maybe_sweep();

        Ok(CacheOutcome {
            result,
            cached: false,
        })
    }

    /// Warms the page after `plan` in a detached task, unless `known_total`
    /// says `plan` is already the last page. Failures are logged and dropped.
    pub fn prefetch_next(&self, plan: &QueryPlan, known_total: u64) -> Option<JoinHandle<()>> {
        let shown = u64::from(plan.page) * u64::from(self.executor.page_size());
        if shown >= known_total {
            return None;
        }

        let next = plan.next_page();
        let cache = self.clone();

        Some(tokio::spawn(async move {
            let key = next.cache_key();
            if cache.storage.get_fresh(&key).await.is_some() {
                return;
            }

            match cache.load_shared(key.clone(), next).await {
                Ok(_) => debug!(key = %key, "Prefetched next page"),
                Err(e) => debug!(key = %key, error = %e, "Prefetch failed"),
            }
        }))
    }

    /// Whether `key` currently holds an unexpired result.
    pub async fn contains_fresh(&self, key: &str) -> bool {
        self.storage.get_fresh(key).await.is_some()
    }

    pub async fn cached_entries(&self) -> usize {
        self.storage.len().await
    }

    pub async fn in_flight(&self) -> usize {
        self.in_flight.lock().await.len()
    }

    pub async fn sweep_expired(&self) -> usize {
        self.storage.sweep(self.storage.ttl()).await
    }

    /// Starts the timer-driven sweeper, replacing any previous one.
    pub fn start_background_sweeper(&self, every: Duration) {
        let handle = self.storage.start_periodic_sweeps(every);
        let mut sweeper = self.sweeper.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = sweeper.replace(handle) {
            previous.abort();
        }
    }

    /// Stops background work owned by the cache.
    pub fn shutdown(&self) {
        let mut sweeper = self.sweeper.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = sweeper.take() {
            handle.abort();
        }
    }

    async fn load_shared(
        &self,
        key: String,
        plan: QueryPlan,
    ) -> Result<Arc<SearchResult>, SearchError> {
        let fetch = {
            let mut in_flight = self.in_flight.lock().await;
            // a fetch may have stored and deregistered since the caller checked
            if let Some(result) = self.storage.get_fresh(&key).await {
                return Ok(result);
            }
            if let Some(existing) = in_flight.get(&key).cloned() {
                debug!(key = %key, "Joining in-flight fetch");
                existing
            } else {
                let fetch = self
                    .clone()
                    .fetch_and_store(key.clone(), plan)
                    .boxed()
                    .shared();
                in_flight.insert(key, fetch.clone());
                // keeps the fetch going even if every waiter goes away
                tokio::spawn(fetch.clone());
                fetch
            }
        };

        fetch.await
    }

    async fn fetch_and_store(
        self,
        key: String,
        plan: QueryPlan,
    ) -> Result<Arc<SearchResult>, SearchError> {
        let outcome = self.executor.execute(&plan).await.map(Arc::new);

        if let Ok(result) = &outcome {
            self.storage.insert(key.clone(), result.clone()).await;
        }
        self.in_flight.lock().await.remove(&key);

        outcome
    }

    fn maybe_sweep(&self) {
        if self.sweep_probability <= 0.0 || !rand::random_bool(self.sweep_probability) {
            return;
        }

        let storage = self.storage.clone();
        tokio::spawn(async move {
            let removed = storage.sweep(storage.ttl()).await;
            debug!(removed, "Swept expired search results after miss");
        });
    }
}
