use thiserror::Error;

/// Errors raised while building the validation data model.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Retrieved sources and generated answers are not index-aligned.
    #[error("sample has {sources} retrieved sources but {answers} generated answers")]
    LengthMismatch { sources: usize, answers: usize },
}
