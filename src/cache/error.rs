use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by cache backends.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache directory could not be created.
    #[error("failed to create cache directory {path}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A cache entry could not be written.
    #[error("failed to write cache entry {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blocking I/O task was cancelled or panicked.
    #[error("cache I/O task failed")]
    Background(#[from] tokio::task::JoinError),
}
