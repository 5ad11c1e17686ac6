use crate::saavn::{ArtistSource, UpstreamQuery};
use artistfeed_core::{Language, QueryPlan, SearchError, SearchResult, SubQuery, merge_results};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Runs a [`QueryPlan`] against the upstream source.
#[derive(Clone)]
pub struct PlanExecutor {
    source: Arc<dyn ArtistSource>,
    page_size: u32,
    timeout: Duration,
}

impl PlanExecutor {
    pub fn new(source: Arc<dyn ArtistSource>, page_size: u32, timeout: Duration) -> Self {
        Self {
            source,
            page_size,
            timeout,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Single-query plans surface any failure. Fan-out plans tolerate
    /// unavailable or timed-out sub-queries, but not malformed payloads, and
    /// fail only if every sub-query failed.
    pub async fn execute(&self, plan: &QueryPlan) -> Result<SearchResult, SearchError> {
        if plan.merge_required {
            return self.fan_out(plan).await;
        }

        match plan.sub_queries.first() {
            Some(sub_query) => self.fetch_one(sub_query, plan.language).await,
            None => Ok(SearchResult::default()),
        }
    }

    async fn fan_out(&self, plan: &QueryPlan) -> Result<SearchResult, SearchError> {
        let outcomes = join_all(
            plan.sub_queries
                .iter()
                .map(|sub_query| self.fetch_one(sub_query, plan.language)),
        )
        .await;

        let mut contributions = Vec::with_capacity(outcomes.len());
        let mut first_error = None;
        let mut failures = 0;

        for (sub_query, outcome) in plan.sub_queries.iter().zip(outcomes) {
            match outcome {
                Ok(result) => contributions.push(result),
                Err(e) if e.is_transient() => {
                    warn!(query = %sub_query.text, page = sub_query.page, error = %e, "Sub-query failed, continuing without it");
                    failures += 1;
                    first_error.get_or_insert(e);
                    contributions.push(SearchResult::default());
                }
                Err(e) => return Err(e),
            }
        }

        if failures == plan.sub_queries.len() {
            if let Some(e) = first_error {
                return Err(e);
            }
        }

        Ok(merge_results(contributions))
    }

    async fn fetch_one(
        &self,
        sub_query: &SubQuery,
        language: Option<Language>,
    ) -> Result<SearchResult, SearchError> {
        let query = UpstreamQuery {
            text: sub_query.text.clone(),
            page: sub_query.page,
            page_size: self.page_size,
            language,
        };

        match tokio::time::timeout(self.timeout, self.source.search(&query)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(SearchError::UpstreamTimeout(self.timeout.as_millis() as u64)),
        }
    }
}
