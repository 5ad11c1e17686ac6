use artistfeed_web::build_router;
use artistfeed_web::config::Config;
use artistfeed_web::state::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("artistfeed_web=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr.clone();
    let app_state = Arc::new(AppState::new(config));

    let app = build_router(app_state.clone());

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(addr = %bind_addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!("Server running on http://{bind_addr}");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
    }

    app_state.shutdown();
    tracing::info!("Server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
