use crate::error::ApiError;
use crate::models::{ArtistQuery, HealthResponse, StatsResponse};
use crate::state::AppState;
use artistfeed_core::{
    SearchError, SearchPage, SearchParams, build_plan, resolve_language, shape_response,
};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Artistfeed API is running".to_string(),
    })
}

pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ArtistQuery>, QueryRejection>,
) -> Result<Json<SearchPage>, ApiError> {
    let Query(params) = params.map_err(|e| SearchError::InvalidRequest(e.body_text()))?;
    let config = &state.config;
    let language = resolve_language(params.language.as_deref(), config.language_policy)?;
    let plan = build_plan(
        &SearchParams::new(params.name, language, params.page),
        &config.planner,
    );

    let outcome = state.search_cache.search(&plan).await?;

    let page = shape_response(
        &plan,
        &outcome.result,
        config.page_size,
        outcome.cached,
        &config.shape,
    );

    // detached; the response never waits on it
    state
        .search_cache
        .prefetch_next(&plan, outcome.result.effective_total());

    Ok(Json(page))
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    Json(StatsResponse {
        cached_entries: state.search_cache.cached_entries().await,
        in_flight: state.search_cache.in_flight().await,
    })
}
