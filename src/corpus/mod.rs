//! Core data model for validation-driven boosting.
//!
//! A [`Question`] pairs input text with its set of acceptable answers. A
//! [`ValidationSample`] records one fully evaluated question: the ordered
//! sources the retriever returned and the answer the generator produced for
//! each of them. The two sequences are index-aligned; the constructor rejects
//! samples that violate that invariant.

pub mod error;

pub use error::CorpusError;

use std::collections::HashMap;
use std::hash::Hash;

/// A question with its acceptable answers and opaque metadata.
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    correct_answers: Vec<String>,
    metadata: HashMap<String, String>,
}

impl Question {
    /// Creates a question with no metadata.
    pub fn new(text: impl Into<String>, correct_answers: Vec<String>) -> Self {
        Self {
            text: text.into(),
            correct_answers,
            metadata: HashMap::new(),
        }
    }

    /// Creates a question carrying opaque metadata.
    pub fn with_metadata(
        text: impl Into<String>,
        correct_answers: Vec<String>,
        metadata: HashMap<String, String>,
    ) -> Self {
        Self {
            text: text.into(),
            correct_answers,
            metadata,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn correct_answers(&self) -> &[String] {
        &self.correct_answers
    }

    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    /// Returns `true` if `answer` exactly matches one of the acceptable answers.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answers.iter().any(|a| a == answer)
    }
}

/// One evaluated validation question.
///
/// `retrieved_sources[i]` produced `generated_answers[i]`; retrieval order is
/// preserved and the two sequences share indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSample {
    correct_answers: Vec<String>,
    retrieved_sources: Vec<String>,
    generated_answers: Vec<String>,
}

impl ValidationSample {
    /// Builds a sample, rejecting mismatched source/answer sequences.
    pub fn new(
        correct_answers: Vec<String>,
        retrieved_sources: Vec<String>,
        generated_answers: Vec<String>,
    ) -> Result<Self, CorpusError> {
        if retrieved_sources.len() != generated_answers.len() {
            return Err(CorpusError::LengthMismatch {
                sources: retrieved_sources.len(),
                answers: generated_answers.len(),
            });
        }

        Ok(Self {
            correct_answers,
            retrieved_sources,
            generated_answers,
        })
    }

    pub fn correct_answers(&self) -> &[String] {
        &self.correct_answers
    }

    pub fn retrieved_sources(&self) -> &[String] {
        &self.retrieved_sources
    }

    pub fn generated_answers(&self) -> &[String] {
        &self.generated_answers
    }

    /// Number of retrieved results in this sample.
    pub fn len(&self) -> usize {
        self.retrieved_sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.retrieved_sources.is_empty()
    }

    /// Returns `true` if `answer` exactly matches one of the acceptable answers.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answers.iter().any(|a| a == answer)
    }
}

/// Most frequent value, ties broken by first-encountered order.
///
/// Returns `None` for an empty slice.
pub fn majority_vote<T>(values: &[T]) -> Option<&T>
where
    T: Eq + Hash,
{
    let mut tallies: HashMap<&T, (usize, usize)> = HashMap::new();

    for (index, value) in values.iter().enumerate() {
        let tally = tallies.entry(value).or_insert((0, index));
        tally.0 += 1;
    }

    tallies
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, _)| value)
}
