//! File-backed implementation of the URL repository.
//!
//! Same semantics as the in-memory backend, with the whole table serialized
//! to a JSON snapshot file on every mutation. On startup the full snapshot
//! is loaded back into memory.
//!
//! ## On-disk format
//!
//! ```json
//! {
//!   "version": 1,
//!   "records": [
//!     { "uuid": "…", "short_url": "abc12345", "original_url": "https://example.com/" }
//!   ]
//! }
//! ```
//!
//! The document is versioned; opening a snapshot with an unknown version
//! fails rather than guessing. A missing file starts an empty store.
//!
//! Every write rewrites the whole file while holding the write lock, so
//! write cost grows with the record count and writers block for the
//! duration of the disk I/O. This is the documented ceiling of this
//! backend, not a bug to fix here.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::ShortUrlRecord;
use crate::domain::repositories::{CreateOutcome, UrlRepository};
use crate::error::AppError;
use crate::infrastructure::persistence::index::{BatchConflict, UrlIndex};

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct SnapshotDocument {
    version: u32,
    records: Vec<SnapshotRecord>,
}

#[derive(Serialize, Deserialize)]
struct SnapshotRecord {
    uuid: Uuid,
    short_url: String,
    original_url: String,
}

/// Durable repository persisting a [`UrlIndex`] to a JSON snapshot file.
#[derive(Debug)]
pub struct FileUrlRepository {
    path: PathBuf,
    index: RwLock<UrlIndex>,
}

impl FileUrlRepository {
    /// Opens the repository, loading an existing snapshot if one is present.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] when the snapshot exists but cannot
    /// be read, parsed, or has an unsupported version. Callers treat this as
    /// fatal at startup.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let index = load_snapshot(&path).await?;

        Ok(Self {
            path,
            index: RwLock::new(index),
        })
    }

    /// Serializes the current table and rewrites the snapshot file.
    ///
    /// Called with the write lock held so the snapshot always reflects a
    /// consistent table state.
    async fn persist(&self, index: &UrlIndex) -> Result<(), AppError> {
        let document = SnapshotDocument {
            version: SNAPSHOT_VERSION,
            records: index
                .entries()
                .map(|(code, stored)| SnapshotRecord {
                    uuid: stored.id,
                    short_url: code.to_string(),
                    original_url: stored.original_url.clone(),
                })
                .collect(),
        };

        let data = serde_json::to_vec(&document).map_err(|e| {
            AppError::internal(
                "Failed to serialize storage snapshot",
                json!({ "reason": e.to_string() }),
            )
        })?;

        tokio::fs::write(&self.path, data).await.map_err(|e| {
            tracing::error!("Failed to write snapshot {}: {e}", self.path.display());
            AppError::internal(
                "Failed to write storage snapshot",
                json!({ "path": self.path.display().to_string() }),
            )
        })
    }
}

async fn load_snapshot(path: &Path) -> Result<UrlIndex, AppError> {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(UrlIndex::new()),
        Err(e) => {
            return Err(AppError::unavailable(
                "Failed to read storage snapshot",
                json!({ "path": path.display().to_string(), "reason": e.to_string() }),
            ));
        }
    };

    let document: SnapshotDocument = serde_json::from_slice(&data).map_err(|e| {
        AppError::unavailable(
            "Failed to parse storage snapshot",
            json!({ "path": path.display().to_string(), "reason": e.to_string() }),
        )
    })?;

    if document.version != SNAPSHOT_VERSION {
        return Err(AppError::unavailable(
            "Unsupported storage snapshot version",
            json!({ "found": document.version, "supported": SNAPSHOT_VERSION }),
        ));
    }

    let mut index = UrlIndex::new();
    for record in document.records {
        index.restore(ShortUrlRecord {
            id: record.uuid,
            code: record.short_url,
            original_url: record.original_url,
        });
    }

    tracing::info!("Loaded {} records from {}", index.len(), path.display());
    Ok(index)
}

#[async_trait]
impl UrlRepository for FileUrlRepository {
    async fn create(&self, record: ShortUrlRecord) -> Result<CreateOutcome, AppError> {
        let mut index = self.index.write().await;
        let outcome = index.insert(record);

        if matches!(outcome, CreateOutcome::Created { .. }) {
            self.persist(&index).await?;
        }

        Ok(outcome)
    }

    async fn create_batch(&self, records: Vec<ShortUrlRecord>) -> Result<(), AppError> {
        let mut index = self.index.write().await;
        index
            .insert_batch(&records)
            .map_err(BatchConflict::into_error)?;
        self.persist(&index).await
    }

    async fn get_original_url(&self, code: &str) -> Result<Option<String>, AppError> {
        let index = self.index.read().await;
        Ok(index.get(code).map(str::to_owned))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    /// Flushes the current table to disk one final time.
    async fn close(&self) -> Result<(), AppError> {
        let index = self.index.read().await;
        self.persist(&index).await
    }
}
