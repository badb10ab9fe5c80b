use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::LlmGeneratorConfig;
use super::error::GeneratorError;
use super::prompt::Prompting;
use super::Generator;
use crate::cache::ResponseCache;
use crate::config::ConfigError;
use crate::corpus::Question;
use crate::hashing::generation_key;

/// Chat-completion backed generator.
///
/// The raw completion content is cached keyed by model and rendered prompt;
/// answer extraction happens after the cache on both paths, so re-running
/// with a different [`Prompting::extract_answer`] does not invalidate cached
/// completions.
pub struct LlmGenerator<P: Prompting, C: ResponseCache> {
    http: reqwest::Client,
    config: LlmGeneratorConfig,
    prompting: P,
    cache: C,
}

impl<P: Prompting, C: ResponseCache> std::fmt::Debug for LlmGenerator<P, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmGenerator")
            .field("endpoint", &self.config.endpoint)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl<P: Prompting, C: ResponseCache> LlmGenerator<P, C> {
    /// Validates the configuration and builds the backend.
    pub fn new(config: LlmGeneratorConfig, prompting: P, cache: C) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            http: reqwest::Client::new(),
            config,
            prompting,
            cache,
        })
    }

    pub fn config(&self) -> &LlmGeneratorConfig {
        &self.config
    }

    async fn complete(&self, prompt: &str) -> Result<String, GeneratorError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.config.max_completion_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: ChatResponse = response.json().await?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GeneratorError::EmptyCompletion)
    }
}

impl<P: Prompting, C: ResponseCache> Generator for LlmGenerator<P, C> {
    async fn generate(
        &self,
        question: &Question,
        context: Option<&str>,
    ) -> Result<String, GeneratorError> {
        let prompt = self.prompting.create_prompt(question, context);
        let key = generation_key(&self.config.model, &prompt);

        if let Some(cached) = self.cache.get(&key).await {
            debug!(key = %key, "completion cache hit");
            return Ok(self.prompting.extract_answer(&cached));
        }

        let completion = self.complete(&prompt).await?;
        self.cache.put(&key, &completion).await?;

        Ok(self.prompting.extract_answer(&completion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::generator::prompt::QaPrompt;

    fn config() -> LlmGeneratorConfig {
        LlmGeneratorConfig::new("https://llm.invalid/v1/chat/completions", "sk-test", "test-model")
    }

    #[tokio::test]
    async fn cached_completions_never_reach_the_network() {
        let cache = MemoryCache::new();
        let question = Question::new("Capital of France?", vec!["Paris".to_string()]);

        // Seed the cache under the exact key the generator derives; the
        // endpoint is unresolvable, so any upstream call would error out.
        let prompt = QaPrompt.create_prompt(&question, Some("snippet"));
        let key = generation_key("test-model", &prompt);
        cache.put(&key, " Paris\n").await.unwrap();

        let generator = LlmGenerator::new(config(), QaPrompt, cache).unwrap();
        let answer = generator.generate(&question, Some("snippet")).await.unwrap();

        assert_eq!(answer, "Paris");
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_at_construction() {
        let cache = MemoryCache::new();
        let result = LlmGenerator::new(
            LlmGeneratorConfig::new("", "sk-test", "test-model"),
            QaPrompt,
            cache,
        );

        assert!(result.is_err());
    }
}
