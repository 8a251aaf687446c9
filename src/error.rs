//! Error types for naver-extract.
//!
//! This module defines the error types returned by fetch and extraction
//! operations. Empty extraction output is deliberately NOT an error: selectors
//! matching nothing is a valid, displayable "no results" state that callers
//! surface differently from a network failure.

/// Error type for fetch and extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The remote host answered with a non-2xx status.
    #[error("request to {url} failed with status {status}")]
    Network { url: String, status: u16 },

    /// HTTP transport failure (connect, timeout, TLS).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A URL could not be parsed. Raised only at the fetch boundary;
    /// malformed links inside a document are dropped, never propagated.
    #[error("invalid url: {0}")]
    MalformedUrl(String),

    /// A selector registry update was rejected.
    #[error("invalid selector table: {0}")]
    Selector(String),
}

/// Result type alias for fetch and extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
