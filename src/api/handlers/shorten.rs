//! Handlers for the shorten endpoints.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{
    BatchShortenRequest, BatchShortenResponse, ShortenRequest, ShortenResponse,
};
use crate::application::services::ShortenOutcome;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a single long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// - **201 Created** `{ "result": "https://sn.test/abc12345" }`
/// - **409 Conflict** with the previously issued short URL when the URL was
///   already shortened — the mapping in the body is valid, only the status
///   signals "nothing new was created"
/// - **400 Bad Request** on validation failure
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let outcome = state.url_service.shorten_url(&payload.url).await?;

    let status = match &outcome {
        ShortenOutcome::Created { .. } => StatusCode::CREATED,
        ShortenOutcome::Existing { .. } => StatusCode::CONFLICT,
    };

    let result = state.url_service.short_url(outcome.code());

    Ok((status, Json(ShortenResponse { result })))
}

/// Creates short URLs for a batch of long URLs, all-or-nothing.
///
/// # Endpoint
///
/// `POST /api/shorten/batch`
///
/// # Request Body
///
/// ```json
/// [
///   { "correlation_id": "id1", "original_url": "https://a.com" },
///   { "correlation_id": "id2", "original_url": "https://b.com" }
/// ]
/// ```
///
/// # Response
///
/// - **201 Created** with one `{ "correlation_id", "short_url" }` entry per
///   input, in input order
/// - **400 Bad Request** on an empty batch or any invalid entry
/// - **409 Conflict** when any entry collides with an existing record; no
///   entry of the batch is stored in that case
pub async fn shorten_batch_handler(
    State(state): State<AppState>,
    Json(payload): Json<Vec<BatchShortenRequest>>,
) -> Result<(StatusCode, Json<Vec<BatchShortenResponse>>), AppError> {
    for item in &payload {
        item.validate()?;
    }

    let items = payload.into_iter().map(Into::into).collect();
    let outputs = state.url_service.shorten_batch(items).await?;

    let body = outputs.into_iter().map(Into::into).collect();

    Ok((StatusCode::CREATED, Json(body)))
}
