//! Domain types passed between the engines, the collaborators and the CLI.
//!
//! Everything here is built fresh for one request and dropped afterwards;
//! nothing is cached or persisted.

use serde::{Deserialize, Serialize};

/// The two text fields an article source must provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub headline: String,
    pub body: String,
}

/// A unit of text plus the identity it is reported under.
///
/// `title`/`url` are opaque to the engines; only `text` is analysed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub url: String,
    pub text: String,
}

impl Document {
    pub fn new(title: impl Into<String>, url: impl Into<String>, text: impl Into<String>) -> Self {
        Self { title: title.into(), url: url.into(), text: text.into() }
    }

    /// Builds a document from a fetched article, keeping the source URL.
    pub fn from_article(url: &str, article: Article) -> Self {
        Self { title: article.headline, url: url.to_string(), text: article.body }
    }
}

/// One row of a similarity ranking. `similarity` is rounded to 2dp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredArticle {
    pub title: String,
    pub url: String,
    pub similarity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub query_article: ScoredArticle,
    pub similar_articles: Vec<ScoredArticle>,
}

/// A cluster of documents as shown to the client: a label and up to a
/// handful of representative keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub topic: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicReport {
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// A label with its model confidence (sentiment, zero-shot classes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

/// A named entity span as returned by a token-classification model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(alias = "entity")]
    pub entity_group: String,
    pub word: String,
    pub score: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub title: String,
    pub summary: String,
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub title: String,
    pub sentiment: String,
    pub confidence: f32,
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityReport {
    pub title: String,
    pub content: String,
    pub entities: Vec<Entity>,
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub primary_category: CategoryScore,
    pub secondary_categories: Vec<CategoryScore>,
    pub classification_model: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub title: String,
    pub category: Classification,
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationReport {
    pub title: String,
    pub original_text: String,
    pub translated_text: String,
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// An article as listed by the third-party news index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    #[serde(default)]
    pub source: Option<NewsSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    pub matching_articles: Vec<NewsArticle>,
}
