//! Article retrieval from schema.org JSON-LD embedded in news pages.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{debug, instrument};

use newslens_core::config::FetchSettings;
use newslens_core::error::{Error, Result};
use newslens_core::traits::ArticleFetcher;
use newslens_core::types::Article;

use crate::client::build_http_client;

const ARTICLE_SCHEMA_SCRIPT: &str = r#"script[type="application/ld+json"]#articleschemascript"#;
const LD_JSON_SCRIPT: &str = r#"script[type="application/ld+json"]"#;

/// Fetches a page over HTTP and reads `headline` / `articleBody` from its
/// JSON-LD.
#[derive(Debug, Clone)]
pub struct JsonLdFetcher {
    client: Client,
}

impl JsonLdFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        let client = build_http_client(settings.timeout_secs, &settings.user_agent, None)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ArticleFetcher for JsonLdFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<Article> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("request to {url} failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("{url} returned {status}")));
        }
        let html = response
            .text()
            .await
            .map_err(|e| Error::Fetch(format!("failed to read body of {url}: {e}")))?;
        let article = parse_article(&html)?;
        debug!(headline = %article.headline, body_chars = article.body.len(), "article parsed");
        Ok(article)
    }
}

/// Extracts an [`Article`] from a page's HTML.
///
/// The `#articleschemascript` element is authoritative when present. Otherwise
/// the first JSON-LD object carrying both fields wins, looking inside
/// `@graph` arrays and top-level arrays as well.
pub fn parse_article(html: &str) -> Result<Article> {
    let primary = selector(ARTICLE_SCHEMA_SCRIPT)?;
    let any_ld_json = selector(LD_JSON_SCRIPT)?;
    let document = Html::parse_document(html);

    if let Some(script) = document.select(&primary).next() {
        let raw: String = script.text().collect();
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| Error::Fetch(format!("article schema is not valid JSON: {e}")))?;
        return article_from(&value).ok_or_else(|| {
            Error::Fetch("article schema is missing a headline or article body".into())
        });
    }

    document
        .select(&any_ld_json)
        .filter_map(|script| serde_json::from_str::<Value>(&script.text().collect::<String>()).ok())
        .find_map(|value| find_article(&value))
        .ok_or_else(|| Error::Fetch("no JSON-LD article with a headline and body found".into()))
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Fetch(format!("invalid selector {css}: {e}")))
}

fn find_article(value: &Value) -> Option<Article> {
    match value {
        Value::Array(items) => items.iter().find_map(find_article),
        Value::Object(map) => article_from(value).or_else(|| map.get("@graph").and_then(find_article)),
        _ => None,
    }
}

fn article_from(value: &Value) -> Option<Article> {
    let field = |name: &str| {
        value
            .get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    Some(Article { headline: field("headline")?, body: field("articleBody")? })
}
