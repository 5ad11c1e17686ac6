use crate::fixtures::{StubSource, page_of, test_config, test_state};
use artistfeed_core::{Language, PlannerConfig, QueryPlan, SearchError, SearchParams, build_plan};
use artistfeed_web::cache::SearchCache;
use artistfeed_web::handlers::search_artists;
use artistfeed_web::models::ArtistQuery;
use axum::extract::{Query, State};
use std::time::Duration;
use tokio::time::Instant;

fn tamil_plan(page: u32) -> QueryPlan {
    build_plan(
        &SearchParams::new(None, Some(Language::Tamil), page),
        &PlannerConfig::default(),
    )
}

#[tokio::test]
async fn prefetch_fills_next_page_with_single_query() {
    let source = StubSource::fixed(page_of(&["Anirudh"], 500));
    let cache = SearchCache::new(source.clone(), &test_config());
    let plan = tamil_plan(1);

    let outcome = cache.search(&plan).await.unwrap();
    assert_eq!(source.calls(), 4);

    let handle = cache
        .prefetch_next(&plan, outcome.result.effective_total())
        .expect("more pages remain");
    handle.await.unwrap();

    assert!(cache.contains_fresh("tamil singer_tamil_2").await);
    assert_eq!(source.calls(), 5);
    let prefetched = source.queries().pop().unwrap();
    assert_eq!(prefetched.text, "tamil singer");
    assert_eq!(prefetched.page, 2);

    assert!(cache.search(&tamil_plan(2)).await.unwrap().cached);
}

#[tokio::test]
async fn prefetch_skips_when_next_page_is_cached() {
    let source = StubSource::fixed(page_of(&["Anirudh"], 500));
    let cache = SearchCache::new(source.clone(), &test_config());

    cache.search(&tamil_plan(2)).await.unwrap();
    let calls = source.calls();

    cache.prefetch_next(&tamil_plan(1), 500).unwrap().await.unwrap();

    assert_eq!(source.calls(), calls);
}

#[tokio::test]
async fn prefetch_skips_after_last_page() {
    let source = StubSource::fixed(page_of(&["Anirudh"], 30));
    let cache = SearchCache::new(source.clone(), &test_config());

    assert!(cache.prefetch_next(&tamil_plan(1), 30).is_none());
    assert!(cache.prefetch_next(&tamil_plan(2), 100).is_none());
    assert_eq!(source.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn prefetch_failure_is_swallowed_and_not_retried() {
    let source = StubSource::new(|query| {
        if query.page == 1 {
            (Duration::ZERO, Ok(page_of(&["Anirudh"], 500)))
        } else {
            (
                Duration::ZERO,
                Err(SearchError::UpstreamUnavailable("down".into())),
            )
        }
    });
    let mut config = test_config();
    config.planner.fan_out = false;
    let cache = SearchCache::new(source.clone(), &config);
    let plan = tamil_plan(1);

    cache.search(&plan).await.unwrap();
    cache.prefetch_next(&plan, 500).unwrap().await.unwrap();
    tokio::time::sleep(Duration::from_secs(60)).await;

    assert_eq!(source.calls(), 2);
    assert!(!cache.contains_fresh("tamil singer_tamil_2").await);
}

#[tokio::test(start_paused = true)]
async fn response_does_not_wait_for_prefetch() {
    let source = StubSource::new(|query| {
        let delay = if query.page == 1 {
            Duration::ZERO
        } else {
            Duration::from_secs(4)
        };
        (delay, Ok(page_of(&["Anirudh", "Sid Sriram"], 500)))
    });
    let state = test_state(source.clone(), test_config());

    let started = Instant::now();
    let response = search_artists(
        State(state.clone()),
        Ok(Query(ArtistQuery {
            name: Some("anirudh".into()),
            language: None,
            page: 1,
        })),
    )
    .await
    .unwrap();

    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(response.0.artists.len(), 2);
    assert!(!state.search_cache.contains_fresh("anirudh_default_2").await);

    tokio::time::sleep(Duration::from_secs(5)).await;

    assert!(state.search_cache.contains_fresh("anirudh_default_2").await);
    assert_eq!(source.calls(), 2);
}
