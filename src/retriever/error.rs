use thiserror::Error;

use crate::cache::CacheError;

/// Errors raised by retriever backends.
#[derive(Debug, Error)]
pub enum RetrieverError {
    /// The upstream search request failed.
    #[error("search request failed")]
    Http(#[from] reqwest::Error),

    /// The search response could not be decoded.
    #[error("malformed search response")]
    Malformed(#[from] serde_json::Error),

    /// The response cache failed.
    #[error("response cache error")]
    Cache(#[from] CacheError),

    /// Backend-specific failure.
    #[error("retriever backend error: {reason}")]
    Backend { reason: String },
}
