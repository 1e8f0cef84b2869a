use crate::config::Config;
use crate::errors::ServerError;
use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/assistant", post(handlers::assistant))
        .route("/tips", get(handlers::tips))
        .route("/faq", get(handlers::faq))
        .route("/track", post(handlers::track))
        .route("/tracking", get(handlers::tracking))
        .route("/contact", post(handlers::contact))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `config.addr()` and serves until Ctrl-C.
pub async fn serve(config: Config) -> Result<(), ServerError> {
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!("listening on http://{addr}");
    axum::serve(listener, router(AppState::default()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
