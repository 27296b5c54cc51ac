//! Short URL record and batch request/response entities.

use uuid::Uuid;

/// A stored mapping between a short code and its original URL.
///
/// Both `code` and `original_url` are unique within a store: submitting an
/// already-shortened URL returns the existing code instead of creating a
/// second record. Records are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrlRecord {
    /// Opaque unique identifier, assigned by the service.
    pub id: Uuid,
    pub code: String,
    pub original_url: String,
}

impl ShortUrlRecord {
    /// Creates a record with a freshly generated identifier.
    pub fn new(code: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            original_url: original_url.into(),
        }
    }
}

/// One entry of a batch shorten request.
///
/// The `correlation_id` is an opaque client-chosen token echoed back in the
/// matching [`BatchShortenOutput`] so callers can pair inputs with results.
#[derive(Debug, Clone)]
pub struct BatchShortenItem {
    pub correlation_id: String,
    pub original_url: String,
}

/// One entry of a batch shorten response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchShortenOutput {
    pub correlation_id: String,
    pub short_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let record = ShortUrlRecord::new("abc12345", "https://example.com");

        assert_eq!(record.code, "abc12345");
        assert_eq!(record.original_url, "https://example.com");
        assert!(!record.id.is_nil());
    }

    #[test]
    fn test_record_ids_are_unique() {
        let a = ShortUrlRecord::new("a", "https://a.test");
        let b = ShortUrlRecord::new("b", "https://b.test");
        assert_ne!(a.id, b.id);
    }
}
