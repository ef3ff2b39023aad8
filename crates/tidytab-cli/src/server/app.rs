//! Axum application setup.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::handlers;
use super::state::AppState;
use super::ServerConfig;
use crate::web::{index_handler, static_handler};

/// Create the Axum router with all routes.
pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    // CORS configuration for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(handlers::health))
        .route("/clean", post(handlers::clean_download))
        .route("/api/clean", post(handlers::clean_json))
        .fallback(static_handler)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(config.output_dir.clone());
    let app = create_router(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(addr = %listener.local_addr()?, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
