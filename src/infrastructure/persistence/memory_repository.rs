//! In-memory implementation of the URL repository.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::ShortUrlRecord;
use crate::domain::repositories::{CreateOutcome, UrlRepository};
use crate::error::AppError;
use crate::infrastructure::persistence::index::{BatchConflict, UrlIndex};

/// Volatile repository backed by a [`UrlIndex`] behind a reader/writer lock.
///
/// Reads proceed concurrently; every mutation takes the write lock for the
/// duration of the duplicate check plus the insert. All state is lost at
/// shutdown — this backend exists for development and tests.
#[derive(Default)]
pub struct MemoryUrlRepository {
    index: RwLock<UrlIndex>,
}

impl MemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn create(&self, record: ShortUrlRecord) -> Result<CreateOutcome, AppError> {
        let mut index = self.index.write().await;
        Ok(index.insert(record))
    }

    async fn create_batch(&self, records: Vec<ShortUrlRecord>) -> Result<(), AppError> {
        let mut index = self.index.write().await;
        index
            .insert_batch(&records)
            .map_err(BatchConflict::into_error)
    }

    async fn get_original_url(&self, code: &str) -> Result<Option<String>, AppError> {
        let index = self.index.read().await;
        Ok(index.get(code).map(str::to_owned))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), AppError> {
        Ok(())
    }
}
