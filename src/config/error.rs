//! Configuration error types.

use thiserror::Error;

/// Errors raised while validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The vote cutoff `k` must be positive.
    #[error("k must be a positive integer")]
    InvalidK,

    /// The learning rate must be a positive, finite float.
    #[error("learning rate must be positive and finite, got {value}")]
    InvalidLearningRate { value: f64 },

    /// The number of training epochs must be positive.
    #[error("num_epochs must be a positive integer")]
    InvalidNumEpochs,

    /// The percentile step must divide `[0, 100)` into at least two points.
    #[error("percentile step must be in 1..=99, got {value}")]
    InvalidPercentileStep { value: usize },

    /// A required credential was not supplied.
    #[error("missing required credential: {name}")]
    MissingCredential { name: &'static str },

    /// A required endpoint URL was not supplied or is empty.
    #[error("missing or empty endpoint URL: {name}")]
    MissingEndpoint { name: &'static str },

    /// No model id was supplied.
    #[error("missing model id")]
    MissingModel,
}
