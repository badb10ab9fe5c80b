use crate::config::ConfigError;
use crate::constants::DEFAULT_MAX_COMPLETION_TOKENS;

/// Configuration for [`crate::generator::LlmGenerator`].
///
/// Credentials are explicit constructor inputs; nothing is read from the
/// environment.
#[derive(Debug, Clone)]
pub struct LlmGeneratorConfig {
    /// Full chat-completion URL, e.g. `https://api.openai.com/v1/chat/completions`.
    pub endpoint: String,

    /// Bearer token for the endpoint.
    pub api_key: String,

    /// Model id sent with every request (also part of the cache key).
    pub model: String,

    /// Completion budget; answers are short, so the default is tight.
    pub max_completion_tokens: u32,

    /// Sampling temperature. Default `0.0` keeps completions reproducible
    /// enough for caching to be meaningful.
    pub temperature: f64,
}

impl LlmGeneratorConfig {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
            max_completion_tokens: DEFAULT_MAX_COMPLETION_TOKENS,
            temperature: 0.0,
        }
    }

    /// Fails fast on missing connection details.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint {
                name: "generator endpoint",
            });
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential {
                name: "generator api_key",
            });
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::MissingModel);
        }

        Ok(())
    }
}
