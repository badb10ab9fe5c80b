use std::sync::Arc;

use parking_lot::Mutex;

use super::error::GeneratorError;
use super::Generator;
use crate::corpus::Question;

/// Extractive mock: answers with the retrieved context verbatim and records
/// every invocation, so tests can script answers through retriever snippets
/// and assert on call counts.
#[derive(Debug, Default, Clone)]
pub struct MockGenerator {
    calls: Arc<Mutex<Vec<Option<String>>>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `generate` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Contexts passed to `generate`, in invocation order.
    pub fn contexts(&self) -> Vec<Option<String>> {
        self.calls.lock().clone()
    }
}

impl Generator for MockGenerator {
    async fn generate(
        &self,
        _question: &Question,
        context: Option<&str>,
    ) -> Result<String, GeneratorError> {
        self.calls.lock().push(context.map(str::to_owned));
        Ok(context.unwrap_or_default().to_string())
    }
}
