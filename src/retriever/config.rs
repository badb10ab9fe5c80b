use crate::config::ConfigError;
use crate::constants::DEFAULT_MAX_SEARCH_RESULTS;

/// Configuration for [`crate::retriever::WebSearchRetriever`].
#[derive(Debug, Clone)]
pub struct WebSearchConfig {
    /// Search API URL, e.g. `https://api.bing.microsoft.com/v7.0/search`.
    pub endpoint: String,

    /// Subscription key sent with every request.
    pub api_key: String,

    /// Result cap per query (also part of the cache key).
    pub max_results: usize,

    /// Market/locale requested from the API.
    pub market: String,
}

impl WebSearchConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            max_results: DEFAULT_MAX_SEARCH_RESULTS,
            market: "en-US".to_string(),
        }
    }

    /// Fails fast on missing connection details.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint {
                name: "search endpoint",
            });
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential {
                name: "search api_key",
            });
        }

        Ok(())
    }
}
