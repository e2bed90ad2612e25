//! # Error Types
//!
//! This module defines error types used throughout the schablone library.

use thiserror::Error;

/// Main error type for schablone operations.
///
/// Every failure is recoverable at the call boundary: callers surface the
/// message and leave their prior state untouched. Nothing here is retried
/// automatically.
#[derive(Debug, Error)]
pub enum SchabloneError {
    /// Vector asset could not be fetched (network failure, non-2xx status)
    #[error("Asset fetch error: {0}")]
    AssetFetch(String),

    /// Malformed input (vector markup, template JSON, data URI)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Template store read/write failure
    #[error("Store error: {0}")]
    Store(String),

    /// Generation backend failure or render-time schema violation
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
