use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument};

use newslens_core::config::{FetchSettings, NewsSearchSettings};
use newslens_core::error::{Error, Result};
use newslens_core::traits::NewsSearch;
use newslens_core::types::NewsArticle;

use crate::client::{base_url, build_http_client};

/// Keyword search against a NewsAPI-compatible `/everything` endpoint.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<NewsArticle>,
}

impl NewsApiClient {
    /// Fails with `InvalidConfig` when no API key is configured.
    pub fn new(settings: &NewsSearchSettings, fetch: &FetchSettings) -> Result<Self> {
        let api_key = settings
            .configured_api_key()
            .ok_or_else(|| {
                Error::InvalidConfig("news_search.api_key is not set (NEWS_API_KEY)".into())
            })?
            .to_string();
        let client = build_http_client(fetch.timeout_secs, &fetch.user_agent, None)?;
        Ok(Self { client, base_url: base_url(&settings.base_url), api_key })
    }
}

#[async_trait]
impl NewsSearch for NewsApiClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<NewsArticle>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::Input("search query is required".into()));
        }
        let url = format!("{}/everything", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| Error::Provider(format!("news search request failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Provider(format!("news search returned {status}")));
        }
        let parsed: EverythingResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("unexpected news search response: {e}")))?;
        info!(results = parsed.articles.len(), "news search complete");
        Ok(parsed.articles)
    }
}
