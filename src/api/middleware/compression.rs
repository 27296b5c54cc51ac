//! Gzip compression middleware.
//!
//! Compresses responses for clients that send `Accept-Encoding: gzip` and
//! transparently inflates gzip-encoded request bodies, so batch payloads can
//! be submitted compressed.

use tower_http::compression::CompressionLayer;
use tower_http::decompression::RequestDecompressionLayer;

/// Response compression layer (gzip only).
pub fn layer() -> CompressionLayer {
    CompressionLayer::new()
}

/// Request body decompression layer (gzip only).
pub fn decompression_layer() -> RequestDecompressionLayer {
    RequestDecompressionLayer::new()
}
