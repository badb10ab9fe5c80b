//! Utility functions and test-set accuracy scoring.

pub mod error;

pub use error::ScoringError;

use std::future::Future;

use tracing::debug;

use crate::corpus::{Question, ValidationSample};

/// Default utility: `1.0` iff the answer exactly matches one of the sample's
/// correct answers.
pub fn exact_match(sample: &ValidationSample, answer: &str) -> f64 {
    if sample.is_correct(answer) { 1.0 } else { 0.0 }
}

/// Anything that answers questions: the plain retrieval-augmented model and
/// the trained booster both implement this.
pub trait AnswerModel: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn generate(
        &self,
        question: &Question,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Accuracy of `model` over a test set.
///
/// Fails on an empty test set rather than producing a silent NaN; model
/// errors propagate unmodified.
pub async fn score<M: AnswerModel>(questions: &[Question], model: &M) -> Result<f64, ScoringError> {
    if questions.is_empty() {
        return Err(ScoringError::EmptyEvaluationSet);
    }

    let mut num_correct = 0usize;

    for question in questions {
        let answer = model
            .generate(question)
            .await
            .map_err(|e| ScoringError::Model {
                source: Box::new(e),
            })?;

        if question.is_correct(&answer) {
            num_correct += 1;
        }
    }

    let accuracy = num_correct as f64 / questions.len() as f64;
    debug!(num_correct, total = questions.len(), accuracy, "scored test set");

    Ok(accuracy)
}
