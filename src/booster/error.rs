use thiserror::Error;

use crate::config::ConfigError;
use crate::corpus::CorpusError;
use crate::generator::GeneratorError;
use crate::retriever::RetrieverError;
use crate::tuning::TuningError;

/// Errors raised while fitting or serving the booster.
#[derive(Debug, Error)]
pub enum BoosterError {
    /// Fitting requires at least one validation question.
    #[error("no data to fit: the validation set is empty")]
    EmptyValidationSet,

    /// Invalid training configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The validation corpus is malformed.
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    /// The retriever collaborator failed.
    #[error(transparent)]
    Retriever(#[from] RetrieverError),

    /// The generator collaborator failed.
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// Threshold tuning failed.
    #[error(transparent)]
    Tuning(#[from] TuningError),

    /// The importance-learning task was cancelled or panicked.
    #[error("importance learning task failed")]
    Background(#[from] tokio::task::JoinError),
}
