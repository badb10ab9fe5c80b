use thiserror::Error;

use crate::cache::CacheError;

/// Errors raised by generator backends.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The upstream completion request failed.
    #[error("completion request failed")]
    Http(#[from] reqwest::Error),

    /// The upstream service returned no usable completion.
    #[error("completion response contained no content")]
    EmptyCompletion,

    /// The response cache failed.
    #[error("response cache error")]
    Cache(#[from] CacheError),

    /// Backend-specific failure.
    #[error("generator backend error: {reason}")]
    Backend { reason: String },
}
