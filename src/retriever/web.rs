use serde::Deserialize;
use tracing::debug;

use super::config::WebSearchConfig;
use super::domain::registrable_domain;
use super::error::RetrieverError;
use super::{RetrievedResult, Retriever};
use crate::cache::ResponseCache;
use crate::config::ConfigError;
use crate::hashing::search_key;

/// Bing-style web-search retriever.
///
/// The raw JSON body of every search is cached keyed by query and result
/// cap, so each distinct query reaches the API exactly once. Results are
/// returned in API ranking order; sources group by registrable domain.
pub struct WebSearchRetriever<C: ResponseCache> {
    http: reqwest::Client,
    config: WebSearchConfig,
    cache: C,
}

impl<C: ResponseCache> std::fmt::Debug for WebSearchRetriever<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSearchRetriever")
            .field("endpoint", &self.config.endpoint)
            .field("max_results", &self.config.max_results)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(rename = "webPages")]
    web_pages: Option<WebPages>,
}

#[derive(Deserialize)]
struct WebPages {
    value: Vec<WebPage>,
}

#[derive(Deserialize)]
struct WebPage {
    url: String,
    snippet: String,
}

impl<C: ResponseCache> WebSearchRetriever<C> {
    /// Validates the configuration and builds the backend.
    pub fn new(config: WebSearchConfig, cache: C) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            http: reqwest::Client::new(),
            config,
            cache,
        })
    }

    pub fn config(&self) -> &WebSearchConfig {
        &self.config
    }

    async fn search(&self, query: &str) -> Result<String, RetrieverError> {
        let key = search_key(query, self.config.max_results);

        if let Some(cached) = self.cache.get(&key).await {
            debug!(key = %key, "search cache hit");
            return Ok(cached);
        }

        let count = self.config.max_results.to_string();
        let response = self
            .http
            .get(&self.config.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.config.api_key)
            .query(&[
                ("q", query),
                ("count", count.as_str()),
                ("mkt", self.config.market.as_str()),
                ("setLang", "en"),
                ("responseFilter", "Webpages"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;

        // Only well-formed bodies are cached; a decode failure surfaces to
        // the caller and the next attempt hits the API again.
        serde_json::from_str::<SearchResponse>(&body)?;
        self.cache.put(&key, &body).await?;

        Ok(body)
    }
}

impl<C: ResponseCache> Retriever for WebSearchRetriever<C> {
    async fn retrieve(&self, question_text: &str) -> Result<Vec<RetrievedResult>, RetrieverError> {
        let body = self.search(question_text).await?;
        let response: SearchResponse = serde_json::from_str(&body)?;

        let results = response
            .web_pages
            .map(|pages| {
                pages
                    .value
                    .into_iter()
                    .map(|page| RetrievedResult::new(page.snippet, page.url))
                    .collect()
            })
            .unwrap_or_default();

        Ok(results)
    }

    fn group(&self, source: &str) -> String {
        registrable_domain(source)
    }
}
