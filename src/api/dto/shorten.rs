//! DTOs for the shorten endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{BatchShortenItem, BatchShortenOutput};

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

/// Response carrying the composed short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub result: String,
}

/// One entry of a batch shorten request.
#[derive(Debug, Deserialize, Validate)]
pub struct BatchShortenRequest {
    /// Client-chosen token echoed back in the matching response entry.
    #[validate(length(min = 1, message = "correlation_id must not be empty"))]
    pub correlation_id: String,

    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,
}

impl From<BatchShortenRequest> for BatchShortenItem {
    fn from(req: BatchShortenRequest) -> Self {
        Self {
            correlation_id: req.correlation_id,
            original_url: req.original_url,
        }
    }
}

/// One entry of a batch shorten response.
#[derive(Debug, Serialize)]
pub struct BatchShortenResponse {
    pub correlation_id: String,
    pub short_url: String,
}

impl From<BatchShortenOutput> for BatchShortenResponse {
    fn from(output: BatchShortenOutput) -> Self {
        Self {
            correlation_id: output.correlation_id,
            short_url: output.short_url,
        }
    }
}
