//! The request-level facade: fetch articles, call hosted models, run the
//! local engines, and shape the reports.

use std::sync::Arc;

use chrono::Utc;
use futures::future::try_join_all;
use tracing::{info, instrument};

use newslens_core::config::{InferenceSettings, TopicSettings};
use newslens_core::error::{Error, Result};
use newslens_core::languages::language_code;
use newslens_core::traits::{ArticleFetcher, EmbeddingProvider, InferenceProvider, NewsSearch};
use newslens_core::types::{
    Article, ClassificationReport, Document, EntityReport, KeywordReport, SearchReport, SentimentReport,
    SimilarityReport, SummaryReport, TopicReport, TranslationReport,
};
use newslens_text::{extract_keywords, KeywordInput, Preprocessor};
use newslens_vector::rank_similar_articles;

use crate::classify::{build_classification, news_categories};
use crate::topics::group_into_topics;

/// Source language of fetched articles for translation.
const ARTICLE_LANGUAGE: &str = "en";

/// External services the analyzer talks to. News search is optional because
/// it needs its own API key.
#[derive(Clone)]
pub struct Collaborators {
    pub fetcher: Arc<dyn ArticleFetcher>,
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub inference: Arc<dyn InferenceProvider>,
    pub news: Option<Arc<dyn NewsSearch>>,
}

pub struct NewsAnalyzer {
    collaborators: Collaborators,
    preprocessor: Preprocessor,
    topics: TopicSettings,
    classification_model: String,
}

impl NewsAnalyzer {
    pub fn new(collaborators: Collaborators, topics: TopicSettings) -> Result<Self> {
        Ok(Self {
            collaborators,
            preprocessor: Preprocessor::new()?,
            topics,
            classification_model: InferenceSettings::default().classification_model,
        })
    }

    /// Model id reported alongside classification results.
    pub fn with_classification_model(mut self, model: impl Into<String>) -> Self {
        self.classification_model = model.into();
        self
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    async fn fetch_article(&self, url: &str) -> Result<Article> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::Input("URL is required".into()));
        }
        let article = self.collaborators.fetcher.fetch(url).await?;
        if article.headline.trim().is_empty() || article.body.trim().is_empty() {
            return Err(Error::Fetch(format!("invalid article content structure at {url}")));
        }
        Ok(article)
    }

    /// Fetches every URL concurrently. The first failure fails the batch.
    async fn fetch_documents(&self, urls: &[String]) -> Result<Vec<Document>> {
        let articles = try_join_all(urls.iter().map(|url| self.fetch_article(url))).await?;
        Ok(urls
            .iter()
            .zip(articles)
            .map(|(url, article)| Document::from_article(url.trim(), article))
            .collect())
    }

    #[instrument(skip(self, urls), fields(candidates = urls.len()))]
    pub async fn similar_articles(&self, query_url: &str, urls: &[String]) -> Result<SimilarityReport> {
        if query_url.trim().is_empty() || urls.is_empty() {
            return Err(Error::Input(
                "a query URL and a non-empty list of article URLs are required".into(),
            ));
        }
        let all: Vec<String> = std::iter::once(query_url.to_string()).chain(urls.iter().cloned()).collect();
        let mut documents = self.fetch_documents(&all).await?;
        let candidates = documents.split_off(1);
        let query = documents
            .pop()
            .ok_or_else(|| Error::Computation("query article missing after fetch".into()))?;
        self.similar_documents(&query, &candidates)
    }

    /// Similarity ranking over documents that are already loaded.
    pub fn similar_documents(&self, query: &Document, candidates: &[Document]) -> Result<SimilarityReport> {
        rank_similar_articles(&self.preprocessor, query, candidates)
    }

    #[instrument(skip(self, urls), fields(urls = urls.len()))]
    pub async fn topics(&self, urls: &[String]) -> Result<TopicReport> {
        if urls.is_empty() {
            return Err(Error::Input("a non-empty list of article URLs is required".into()));
        }
        let documents = self.fetch_documents(urls).await?;
        let texts: Vec<String> = documents.into_iter().map(|d| d.text).collect();
        self.topics_for_texts(&texts).await
    }

    /// Embeds `texts` and groups them into topics.
    #[instrument(skip_all, fields(texts = texts.len(), embedder = self.collaborators.embedder.embedder_id()))]
    pub async fn topics_for_texts(&self, texts: &[String]) -> Result<TopicReport> {
        if texts.is_empty() {
            return Err(Error::Input("no texts provided for topic modeling".into()));
        }
        let embeddings = self.collaborators.embedder.embed(texts).await?;
        if embeddings.len() != texts.len() {
            return Err(Error::Provider(format!(
                "embedding provider returned {} vectors for {} texts",
                embeddings.len(),
                texts.len()
            )));
        }
        let report = group_into_topics(&self.preprocessor, texts, &embeddings, &self.topics)?;
        info!(topics = report.topics.len(), "topics grouped");
        Ok(report)
    }

    /// Keywords from the article headline.
    #[instrument(skip(self))]
    pub async fn keywords(&self, url: &str) -> Result<KeywordReport> {
        let article = self.fetch_article(url).await?;
        let keywords = extract_keywords(&self.preprocessor, article.headline.as_str());
        Ok(KeywordReport { title: Some(article.headline), keywords, source_url: Some(url.to_string()) })
    }

    pub fn keywords_for_texts(&self, input: impl Into<KeywordInput>) -> KeywordReport {
        KeywordReport { title: None, keywords: extract_keywords(&self.preprocessor, input), source_url: None }
    }

    #[instrument(skip(self))]
    pub async fn summarize(&self, url: &str) -> Result<SummaryReport> {
        let article = self.fetch_article(url).await?;
        let summary = self.collaborators.inference.summarize(&article.body).await?;
        Ok(SummaryReport { title: article.headline, summary, source_url: url.to_string() })
    }

    #[instrument(skip(self))]
    pub async fn sentiment(&self, url: &str) -> Result<SentimentReport> {
        let article = self.fetch_article(url).await?;
        let top = self
            .collaborators
            .inference
            .sentiment(&article.body)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Provider("sentiment model returned no labels".into()))?;
        Ok(SentimentReport {
            title: article.headline,
            sentiment: top.label,
            confidence: top.score,
            source_url: url.to_string(),
        })
    }

    /// Named entities found in the article summary.
    #[instrument(skip(self))]
    pub async fn entities(&self, url: &str) -> Result<EntityReport> {
        let article = self.fetch_article(url).await?;
        let summary = self.collaborators.inference.summarize(&article.body).await?;
        let entities = self.collaborators.inference.entities(&summary).await?;
        Ok(EntityReport { title: article.headline, content: summary, entities, source_url: url.to_string() })
    }

    #[instrument(skip(self))]
    pub async fn classify(&self, url: &str) -> Result<ClassificationReport> {
        let article = self.fetch_article(url).await?;
        let scores = self
            .collaborators
            .inference
            .classify(&article.body, &news_categories())
            .await?;
        let category = build_classification(&scores, &self.classification_model, Utc::now())?;
        Ok(ClassificationReport { title: article.headline, category, source_url: url.to_string() })
    }

    /// Summarises the article, then translates the summary into `target_lang`.
    #[instrument(skip(self))]
    pub async fn translate(&self, url: &str, target_lang: &str) -> Result<TranslationReport> {
        if target_lang.trim().is_empty() {
            return Err(Error::Input("URL and target language are required".into()));
        }
        language_code(target_lang)?;
        let article = self.fetch_article(url).await?;
        let summary = self.collaborators.inference.summarize(&article.body).await?;
        let translated_text = self
            .collaborators
            .inference
            .translate(&summary, ARTICLE_LANGUAGE, target_lang)
            .await?;
        Ok(TranslationReport {
            title: article.headline,
            original_text: summary,
            translated_text,
            source_url: url.to_string(),
        })
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<SearchReport> {
        if query.trim().is_empty() {
            return Err(Error::Input("search query is required".into()));
        }
        let news = self
            .collaborators
            .news
            .as_ref()
            .ok_or_else(|| Error::InvalidConfig("news search is not configured (NEWS_API_KEY)".into()))?;
        let matching_articles = news.search(query).await?;
        Ok(SearchReport { matching_articles })
    }
}
