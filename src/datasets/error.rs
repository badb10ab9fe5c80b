use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading validation datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("failed to read dataset file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset file is not valid JSON of the expected shape.
    #[error("failed to parse dataset file")]
    Parse(#[from] serde_json::Error),
}
