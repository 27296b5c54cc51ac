//! HTTP server initialization and runtime setup.
//!
//! Builds the configured storage backend, wires the service and router, and
//! drives the Axum server lifecycle including graceful shutdown.

use crate::config::{Config, StorageBackend};
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::persistence::{
    FileUrlRepository, MemoryUrlRepository, PgUrlRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::extract::Request;
use axum::{Router, ServiceExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::normalize_path::NormalizePath;

/// Builds the storage backend selected at configuration time.
///
/// An unreachable backend (bad DSN, unreadable snapshot) is fatal here:
/// the process refuses to start rather than limp along without storage.
pub async fn build_repository(config: &Config) -> Result<Arc<dyn UrlRepository>> {
    let repository: Arc<dyn UrlRepository> = match &config.backend {
        StorageBackend::Memory => Arc::new(MemoryUrlRepository::new()),
        StorageBackend::File { path } => Arc::new(
            FileUrlRepository::open(path)
                .await
                .with_context(|| format!("Failed to open file storage at {}", path.display()))?,
        ),
        StorageBackend::Postgres { dsn } => Arc::new(
            PgUrlRepository::connect(dsn, config)
                .await
                .context("Failed to connect to Postgres storage")?,
        ),
    };

    tracing::info!("Storage backend ready: {}", config.backend.name());
    Ok(repository)
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The storage backend cannot be initialized
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config).await?;

    let url_service = Arc::new(crate::application::services::UrlService::new(
        repository.clone(),
        config.base_url.clone(),
    ));
    let state = AppState::new(url_service);

    let app = app_router(state);

    let served = serve(&config, app).await;

    // Flush and release the store even when bind or serve failed, so the
    // file backend always gets its final flush.
    let closed = repository.close().await;
    served?;
    closed.map_err(|e| anyhow::anyhow!("Failed to close storage: {e}"))?;
    tracing::info!("Storage closed, shutting down");

    Ok(())
}

async fn serve(config: &Config, app: NormalizePath<Router>) -> Result<()> {
    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown signal handler: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
