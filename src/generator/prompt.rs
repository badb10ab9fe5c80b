use crate::corpus::Question;

/// Prompt-construction strategy for [`crate::generator::LlmGenerator`].
///
/// Implementations are interchangeable and selected at construction time:
/// `create_prompt` renders the question (and retrieved context, when present)
/// into the completion prompt, `extract_answer` maps the raw completion back
/// to a bare answer string.
pub trait Prompting: Send + Sync {
    fn create_prompt(&self, question: &Question, context: Option<&str>) -> String;

    fn extract_answer(&self, completion: &str) -> String;
}

/// Minimal closed-book / open-book QA prompt.
///
/// Answers are expected on the first line of the completion; surrounding
/// whitespace is stripped.
#[derive(Debug, Clone, Copy, Default)]
pub struct QaPrompt;

impl Prompting for QaPrompt {
    fn create_prompt(&self, question: &Question, context: Option<&str>) -> String {
        match context {
            Some(context) => format!(
                "Answer the question using the context. Reply with the answer only.\n\n\
                 Context: {context}\nQuestion: {question}\nAnswer:",
                question = question.text(),
            ),
            None => format!(
                "Answer the question. Reply with the answer only.\n\n\
                 Question: {question}\nAnswer:",
                question = question.text(),
            ),
        }
    }

    fn extract_answer(&self, completion: &str) -> String {
        completion
            .trim()
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}
