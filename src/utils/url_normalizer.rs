//! URL validation and normalization.
//!
//! Duplicate detection compares stored URLs byte-for-byte, so submitted URLs
//! are first brought into a canonical form: `https://EXAMPLE.com:443/x#top`
//! and `https://example.com/x` shorten to the same code.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("Failed to normalize URL: {0}")]
    NormalizationFailed(String),
}

/// Normalizes a URL to a canonical form.
///
/// Rules: scheme must be `http` or `https` (rejects `javascript:`, `data:`,
/// `file:` and friends), hostname lowercased, fragment dropped, default
/// port removed. Path, case and query parameters are preserved as-is.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed or empty
/// input and [`UrlNormalizationError::UnsupportedProtocol`] for non-HTTP(S)
/// schemes.
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let mut url =
        Url::parse(input).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    if let Some(host) = url.host_str() {
        let host = host.to_ascii_lowercase();
        url.set_host(Some(&host)).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("Failed to set normalized host".to_string())
        })?;
    }

    url.set_fragment(None);

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port {
        url.set_port(None).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("Failed to remove default port".to_string())
        })?;
    }

    Ok(url.to_string())
}
