use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Article, Entity, LabelScore, NewsArticle};

/// Retrieves the headline and body behind a URL.
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Article>;
}

/// Produces one embedding per input text, in input order.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Stable identifier for the provider/model (e.g. `hashing:d384`).
    fn embedder_id(&self) -> &str;
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Hosted model calls. Every method fails with `Error::Provider` on upstream
/// failure or an unexpected response shape.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String>;
    /// Labels sorted by descending score.
    async fn sentiment(&self, text: &str) -> Result<Vec<LabelScore>>;
    async fn entities(&self, text: &str) -> Result<Vec<Entity>>;
    /// Zero-shot classification over `labels`, sorted by descending score.
    async fn classify(&self, text: &str, labels: &[String]) -> Result<Vec<LabelScore>>;
    /// `source_lang`/`target_lang` are ISO 639-1 codes.
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String>;
}

/// Keyword search over a third-party news index.
#[async_trait]
pub trait NewsSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<NewsArticle>>;
}
