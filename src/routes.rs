//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`            - Short link redirect
//! - `GET  /health`            - Health check (storage ping)
//! - `POST /api/shorten`       - Shorten a single URL
//! - `POST /api/shorten/batch` - Shorten a batch of URLs
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Compression** - Gzip response compression and request decompression
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{
    health_handler, redirect_handler, shorten_batch_handler, shorten_handler,
};
use crate::api::middleware::{compression, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/shorten/batch", post(shorten_batch_handler));

    let router = Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
        .layer(compression::layer())
        .layer(compression::decompression_layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
