use thiserror::Error;

/// Errors raised while scoring a model over a test set.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// Accuracy over zero questions is undefined.
    #[error("no data to score: the evaluation set is empty")]
    EmptyEvaluationSet,

    /// The evaluated model failed to produce an answer.
    #[error("model failed while scoring")]
    Model {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
