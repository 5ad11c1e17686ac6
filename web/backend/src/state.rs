use crate::cache::SearchCache;
use crate::config::Config;
use crate::saavn::{ArtistSource, SaavnClient};
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub search_cache: SearchCache,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let source = Arc::new(SaavnClient::new(config.upstream_base_url.clone()));
        Self::with_source(config, source)
    }

    /// State backed by an arbitrary source, for tests and alternative providers.
    pub fn with_source(config: Config, source: Arc<dyn ArtistSource>) -> Self {
        let search_cache = SearchCache::new(source, &config);
        if let Some(every) = config.sweep_interval {
            search_cache.start_background_sweeper(every);
        }

        Self {
            config,
            search_cache,
        }
    }

    pub fn shutdown(&self) {
        self.search_cache.shutdown();
    }
}
