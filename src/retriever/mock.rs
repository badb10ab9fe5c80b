use std::collections::HashMap;

use super::domain::registrable_domain;
use super::error::RetrieverError;
use super::{RetrievedResult, Retriever};

/// Scripted retriever: a fixed ranked result list per question text.
///
/// Unscripted questions retrieve zero results. Groups by registrable domain,
/// like the web-search backend.
#[derive(Debug, Default, Clone)]
pub struct MockRetriever {
    results: HashMap<String, Vec<RetrievedResult>>,
}

impl MockRetriever {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the ranked results for one question.
    pub fn script(
        mut self,
        question_text: impl Into<String>,
        results: Vec<RetrievedResult>,
    ) -> Self {
        self.results.insert(question_text.into(), results);
        self
    }
}

impl Retriever for MockRetriever {
    async fn retrieve(&self, question_text: &str) -> Result<Vec<RetrievedResult>, RetrieverError> {
        Ok(self.results.get(question_text).cloned().unwrap_or_default())
    }

    fn group(&self, source: &str) -> String {
        registrable_domain(source)
    }
}
