//! URL shortening and resolution service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{BatchShortenItem, BatchShortenOutput, ShortUrlRecord};
use crate::domain::repositories::{CreateOutcome, UrlRepository};
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::url_normalizer::normalize_url;

/// Result of a shorten request, as seen by handlers.
///
/// `Existing` means the URL was shortened before and no new record was
/// created; the HTTP layer presents it as 409 with the previously issued
/// code, which makes shortening idempotent keyed on the normalized URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenOutcome {
    Created { code: String },
    Existing { code: String },
}

impl ShortenOutcome {
    pub fn code(&self) -> &str {
        match self {
            ShortenOutcome::Created { code } | ShortenOutcome::Existing { code } => code,
        }
    }
}

/// Service orchestrating code generation and storage.
///
/// Persistence-agnostic: the backend is chosen once at startup and injected
/// as a trait object. The service owns URL normalization and the composition
/// of full short URLs from the configured base URL; the storage layer only
/// ever sees canonical URLs and raw codes.
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
    base_url: String,
}

impl UrlService {
    /// Creates a new service. A trailing slash on `base_url` is dropped so
    /// composed URLs always have exactly one separator.
    pub fn new(repository: Arc<dyn UrlRepository>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            repository,
            base_url,
        }
    }

    /// Shortens a single URL.
    ///
    /// Normalizes the input, generates a fresh id + code, and delegates to
    /// the repository. A duplicate original URL comes back as
    /// [`ShortenOutcome::Existing`] with the code issued earlier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for malformed input and storage
    /// errors unchanged.
    pub async fn shorten_url(&self, original_url: &str) -> Result<ShortenOutcome, AppError> {
        let normalized = normalize_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let record = ShortUrlRecord::new(generate_code(), normalized);

        match self.repository.create(record).await? {
            CreateOutcome::Created { code } => Ok(ShortenOutcome::Created { code }),
            CreateOutcome::Duplicate { code } => Ok(ShortenOutcome::Existing { code }),
        }
    }

    /// Shortens a batch of URLs, all-or-nothing.
    ///
    /// Every input is validated and assigned a fresh code before anything is
    /// stored; any conflict rejects the whole batch and leaves the store
    /// unchanged. Outputs carry the caller's correlation ids paired with the
    /// composed short URLs, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty batch or any malformed
    /// URL, [`AppError::Conflict`] when the batch collides with existing
    /// records.
    pub async fn shorten_batch(
        &self,
        items: Vec<BatchShortenItem>,
    ) -> Result<Vec<BatchShortenOutput>, AppError> {
        if items.is_empty() {
            return Err(AppError::bad_request("Empty batch not allowed", json!({})));
        }

        let mut records = Vec::with_capacity(items.len());
        let mut outputs = Vec::with_capacity(items.len());

        for item in items {
            let normalized = normalize_url(&item.original_url).map_err(|e| {
                AppError::bad_request(
                    "Invalid URL format",
                    json!({
                        "correlation_id": item.correlation_id,
                        "reason": e.to_string()
                    }),
                )
            })?;

            let record = ShortUrlRecord::new(generate_code(), normalized);
            outputs.push(BatchShortenOutput {
                correlation_id: item.correlation_id,
                short_url: self.short_url(&record.code),
            });
            records.push(record);
        }

        self.repository.create_batch(records).await?;

        Ok(outputs)
    }

    /// Resolves a short code to its original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown code.
    pub async fn get_original_url(&self, code: &str) -> Result<String, AppError> {
        self.repository
            .get_original_url(code)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "code": code })))
    }

    /// Delegates the liveness check to the storage backend.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Composes the full short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}
