//! Repository trait for short URL storage.

use crate::domain::entities::ShortUrlRecord;
use crate::error::AppError;
use async_trait::async_trait;

/// Result of a single-record insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The record was stored under the given code.
    Created { code: String },
    /// The original URL was already shortened; carries the existing code.
    ///
    /// Not an error: callers must treat this as "already shortened" and
    /// return the existing mapping.
    Duplicate { code: String },
}

impl CreateOutcome {
    /// The short code of the stored or pre-existing mapping.
    pub fn code(&self) -> &str {
        match self {
            CreateOutcome::Created { code } | CreateOutcome::Duplicate { code } => code,
        }
    }
}

/// Storage interface for short URL mappings.
///
/// All backends enforce the same two uniqueness rules: one record per short
/// code and one record per original URL. Duplicate original URLs resolve to
/// [`CreateOutcome::Duplicate`]; short-code conflicts during batch insert
/// fail the whole batch.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryUrlRepository`]
/// - [`crate::infrastructure::persistence::FileUrlRepository`]
/// - [`crate::infrastructure::persistence::PgUrlRepository`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a single mapping.
    ///
    /// If the original URL already has a short code, returns
    /// [`CreateOutcome::Duplicate`] with that code and stores nothing.
    ///
    /// A short-code collision is not detected here: the in-process backends
    /// overwrite the previous mapping, the Postgres backend surfaces the
    /// unique-constraint violation as [`AppError::Conflict`]. With 2^48
    /// random codes this is a documented edge case, not a handled one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] or [`AppError::Conflict`] on storage
    /// failure.
    async fn create(&self, record: ShortUrlRecord) -> Result<CreateOutcome, AppError>;

    /// Inserts a batch of mappings, all-or-nothing.
    ///
    /// If any code or original URL in the batch conflicts with an existing
    /// record (or with another batch entry), no record is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] on any conflict, [`AppError::Internal`]
    /// on storage failure.
    async fn create_batch(&self, records: Vec<ShortUrlRecord>) -> Result<(), AppError>;

    /// Looks up the original URL for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage failure.
    async fn get_original_url(&self, code: &str) -> Result<Option<String>, AppError>;

    /// Liveness check. A no-op for in-process backends, a network round-trip
    /// for Postgres.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] when the backend is unreachable.
    async fn ping(&self) -> Result<(), AppError>;

    /// Releases resources. The file backend flushes its state to disk,
    /// Postgres closes the connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the final flush fails.
    async fn close(&self) -> Result<(), AppError>;
}
