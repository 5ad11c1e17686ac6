use crate::fixtures::{StubSource, page_of, test_config, test_state};
use artistfeed_core::{LanguagePolicy, SearchPage};
use artistfeed_web::build_router;
use artistfeed_web::handlers::{health_check, search_artists};
use artistfeed_web::models::{ArtistQuery, ErrorResponse};
use axum::body::{Body, to_bytes};
use axum::extract::{Query, State};
use axum::http::{Request, StatusCode};
use std::time::Duration;
use tower::ServiceExt;

fn query(name: Option<&str>, language: Option<&str>, page: u32) -> ArtistQuery {
    ArtistQuery {
        name: name.map(str::to_string),
        language: language.map(str::to_string),
        page,
    }
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn health_check_reports_ok() {
    let response = health_check().await;
    assert_eq!(response.0.status, "ok");
}

#[tokio::test]
async fn search_returns_envelope() {
    let source = StubSource::fixed(page_of(&["Anirudh", "Sid Sriram"], 2));
    let state = test_state(source, test_config());

    let page = search_artists(State(state), Ok(Query(query(Some("anirudh"), None, 1))))
        .await
        .unwrap()
        .0;

    assert_eq!(page.page, 1);
    assert_eq!(page.per_page, 50);
    assert_eq!(page.language, "default");
    assert_eq!(page.search_query, "anirudh");
    assert_eq!(page.total, 2);
    assert_eq!(page.artists.len(), 2);
    assert_eq!(page.artists[0].name, "Anirudh");
    assert_eq!(page.artists[0].role, "Singer");
    assert!(!page.cached);
}

#[tokio::test]
async fn repeated_search_is_cached_and_identical() {
    let source = StubSource::fixed(page_of(&["Anirudh", "Sid Sriram"], 2));
    let state = test_state(source.clone(), test_config());

    let first = search_artists(State(state.clone()), Ok(Query(query(None, Some("tamil"), 1))))
        .await
        .unwrap()
        .0;
    let second = search_artists(State(state), Ok(Query(query(None, Some("tamil"), 1))))
        .await
        .unwrap()
        .0;

    assert!(!first.cached);
    assert!(second.cached);
    assert_eq!(first.artists, second.artists);
    assert_eq!(first.total, second.total);
    assert_eq!(source.calls(), 4);
}

#[tokio::test]
async fn lenient_policy_falls_back_to_default_search() {
    let source = StubSource::fixed(page_of(&["Anyone"], 1));
    let state = test_state(source.clone(), test_config());

    let page = search_artists(State(state), Ok(Query(query(None, Some("klingon"), 1))))
        .await
        .unwrap()
        .0;

    assert_eq!(page.language, "default");
    assert_eq!(page.search_query, "artist");
    assert_eq!(source.queries()[0].text, "artist");
}

#[tokio::test]
async fn strict_policy_rejects_unknown_language() {
    let source = StubSource::fixed(page_of(&["Anyone"], 1));
    let mut config = test_config();
    config.language_policy = LanguagePolicy::Strict;
    let app = build_router(test_state(source.clone(), config));

    let (status, body) = get(app, "/api/artists?language=klingon").await;
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error.success);
    assert!(error.error.contains("klingon"));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn malformed_provider_payload_is_a_gateway_error() {
    let source = StubSource::new(|_| {
        (
            Duration::ZERO,
            artistfeed_core::parse_provider_payload("Service Unavailable"),
        )
    });
    let app = build_router(test_state(source, test_config()));

    let (status, body) = get(app, "/api/artists?name=anirudh").await;
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(!error.success);
    assert!(error.error.starts_with("malformed provider payload"));
}

#[tokio::test]
async fn non_numeric_page_is_rejected_with_error_body() {
    let source = StubSource::fixed(page_of(&["Arijit"], 1));
    let state = test_state(source.clone(), test_config());

    for uri in ["/api/artists?p=abc", "/api/artists?page=-1"] {
        let (status, body) = get(build_router(state.clone()), uri).await;
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(!error.success);
        assert!(error.error.starts_with("invalid request"), "{}", error.error);
    }
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn short_parameter_names_are_accepted() {
    let source = StubSource::fixed(page_of(&["Arijit"], 1));
    let mut config = test_config();
    config.planner.fan_out = false;
    let app = build_router(test_state(source.clone(), config));

    let (status, body) = get(app, "/api/artists?l=Hindi&p=3").await;
    let page: SearchPage = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page.page, 3);
    assert_eq!(page.language, "hindi");
    assert_eq!(page.search_query, "hindi singer");
    assert_eq!(source.queries()[0].page, 3);
}

#[tokio::test]
async fn response_json_uses_camel_case_fields() {
    let source = StubSource::fixed(page_of(&["Arijit"], 1));
    let app = build_router(test_state(source, test_config()));

    let (status, body) = get(app, "/api/artists").await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["perPage"], 50);
    assert_eq!(json["searchQuery"], "artist");
    assert_eq!(json["language"], "default");
    assert_eq!(json["page"], 1);
    assert_eq!(json["cached"], false);
    assert_eq!(json["artists"][0]["name"], "Arijit");
}

#[tokio::test]
async fn stats_report_cached_entries() {
    let source = StubSource::fixed(page_of(&["Arijit"], 1));
    let state = test_state(source, test_config());

    search_artists(State(state.clone()), Ok(Query(query(Some("arijit"), None, 1))))
        .await
        .unwrap();
    let (status, body) = get(build_router(state), "/api/stats").await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cachedEntries"], 1);
    assert_eq!(json["inFlight"], 0);
}
