//! Upstream error definitions.

use thiserror::Error;

/// Errors that can occur while talking to the upstream API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The outbound HTTP client could not be built.
    #[error("failed to build upstream client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be constructed or sent.
    #[error("upstream request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The response body could not be read to the end.
    #[error("failed reading upstream response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
