pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod saavn;
pub mod state;

use axum::{Router, routing::get};
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/artists", get(handlers::search_artists))
        .route("/api/stats", get(handlers::get_stats))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
