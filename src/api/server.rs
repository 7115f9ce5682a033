use std::net::SocketAddr;

use axum::{Router, routing::get, routing::post};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::decompression::RequestDecompressionLayer;
use tracing::info;

use super::{
    services::{download_file, get_status, health, list_formats, submit_download},
    state::AppState,
};
use crate::config::Config;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Build the application router.
///
/// Routes match the original backend so the existing polling frontend
/// keeps working unchanged. `POST /download` submits; `GET
/// /download/{filename}` fetches a finished file.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/download", post(submit_download))
        .route("/download/{filename}", get(download_file))
        .route("/status/{job_id}", get(get_status))
        .route("/formats", get(list_formats))
        .route("/health", get(health))
        .with_state(state)
        // The frontend polls from another origin
        .layer(CorsLayer::permissive())
        // Automatically decompress gzip/deflate/brotli request bodies
        .layer(RequestDecompressionLayer::new())
}

pub async fn run(address: Option<SocketAddr>) -> Result<(), AnyError> {
    // Load config
    info!("Loading configuration");
    let config = Config::load().map_err(|e| format!("Failed to load config: {}", e))?;

    let address = address.unwrap_or(config.server.bind_addr);

    // Make sure the download directory exists before the first job runs
    info!(path = %config.downloader.download_dir.display(), "Ensuring download directory");
    tokio::fs::create_dir_all(&config.downloader.download_dir)
        .await
        .map_err(|e| format!("Failed to create download directory: {}", e))?;

    let state = AppState::new(config);
    let app = router(state);

    let listener = TcpListener::bind(address).await?;
    info!(%address, "clipfetch API listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
