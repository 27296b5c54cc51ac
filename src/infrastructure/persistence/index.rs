//! In-process URL table shared by the memory and file backends.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::ShortUrlRecord;
use crate::domain::repositories::CreateOutcome;
use crate::error::AppError;

/// A stored mapping, keyed by short code in [`UrlIndex`].
#[derive(Debug, Clone)]
pub struct StoredUrl {
    pub id: Uuid,
    pub original_url: String,
}

/// Primary map (code → record) plus a secondary index (original URL → code).
///
/// The secondary index makes the duplicate-URL check O(1) instead of a scan
/// over all records. Invariant: every entry in `code_by_url` points at a
/// live entry in `by_code` and vice versa.
#[derive(Debug, Default)]
pub struct UrlIndex {
    by_code: HashMap<String, StoredUrl>,
    code_by_url: HashMap<String, String>,
}

impl UrlIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a single record, resolving duplicate original URLs to the
    /// existing code.
    ///
    /// A short-code collision overwrites the previous mapping and unlinks
    /// its secondary-index entry.
    pub fn insert(&mut self, record: ShortUrlRecord) -> CreateOutcome {
        if let Some(existing) = self.code_by_url.get(&record.original_url) {
            return CreateOutcome::Duplicate {
                code: existing.clone(),
            };
        }

        let ShortUrlRecord {
            id,
            code,
            original_url,
        } = record;

        if let Some(previous) = self.by_code.insert(
            code.clone(),
            StoredUrl {
                id,
                original_url: original_url.clone(),
            },
        ) {
            self.code_by_url.remove(&previous.original_url);
        }
        self.code_by_url.insert(original_url, code.clone());

        CreateOutcome::Created { code }
    }

    /// Inserts a batch of records, all-or-nothing.
    ///
    /// The batch is rejected without mutation when any code or original URL
    /// conflicts with an existing record or with another batch entry. On
    /// conflict, returns the offending code or URL.
    pub fn insert_batch(&mut self, records: &[ShortUrlRecord]) -> Result<(), BatchConflict> {
        let mut pending_codes: HashSet<&str> = HashSet::with_capacity(records.len());
        let mut pending_urls: HashSet<&str> = HashSet::with_capacity(records.len());

        for record in records {
            if self.by_code.contains_key(&record.code) || !pending_codes.insert(&record.code) {
                return Err(BatchConflict::Code(record.code.clone()));
            }
            if self.code_by_url.contains_key(&record.original_url)
                || !pending_urls.insert(&record.original_url)
            {
                return Err(BatchConflict::OriginalUrl(record.original_url.clone()));
            }
        }

        for record in records {
            self.by_code.insert(
                record.code.clone(),
                StoredUrl {
                    id: record.id,
                    original_url: record.original_url.clone(),
                },
            );
            self.code_by_url
                .insert(record.original_url.clone(), record.code.clone());
        }

        Ok(())
    }

    /// Restores a record loaded from a snapshot, keeping both maps in sync.
    ///
    /// Later snapshot entries win on conflict, mirroring [`Self::insert`].
    pub fn restore(&mut self, record: ShortUrlRecord) {
        match self.code_by_url.entry(record.original_url.clone()) {
            Entry::Occupied(_) => {}
            Entry::Vacant(slot) => {
                slot.insert(record.code.clone());
                self.by_code.insert(
                    record.code,
                    StoredUrl {
                        id: record.id,
                        original_url: record.original_url,
                    },
                );
            }
        }
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.by_code.get(code).map(|s| s.original_url.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Iterates over all stored mappings as `(code, record)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &StoredUrl)> {
        self.by_code.iter().map(|(code, url)| (code.as_str(), url))
    }
}

/// Why a batch insert was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchConflict {
    Code(String),
    OriginalUrl(String),
}

impl BatchConflict {
    /// Maps the conflict to the [`AppError::Conflict`] surfaced by
    /// repositories.
    pub fn into_error(self) -> AppError {
        match self {
            BatchConflict::Code(code) => {
                AppError::conflict("Short code already exists", json!({ "code": code }))
            }
            BatchConflict::OriginalUrl(url) => {
                AppError::conflict("URL already shortened", json!({ "original_url": url }))
            }
        }
    }
}
