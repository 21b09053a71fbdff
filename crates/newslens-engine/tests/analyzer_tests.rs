use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use newslens_core::config::TopicSettings;
use newslens_core::error::{Error, Result};
use newslens_core::traits::{ArticleFetcher, EmbeddingProvider, InferenceProvider, NewsSearch};
use newslens_core::types::{Article, Entity, LabelScore, NewsArticle};
use newslens_engine::{Collaborators, NewsAnalyzer};

struct FakeFetcher {
    pages: HashMap<String, Article>,
}

impl FakeFetcher {
    fn new(pages: &[(&str, &str, &str)]) -> Self {
        let pages = pages
            .iter()
            .map(|(url, headline, body)| {
                (url.to_string(), Article { headline: headline.to_string(), body: body.to_string() })
            })
            .collect();
        Self { pages }
    }
}

#[async_trait]
impl ArticleFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<Article> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Fetch(format!("no page at {url}")))
    }
}

/// Embeds each text as a 2-d point keyed on whether it mentions "sport".
struct FakeEmbedder {
    drop_one: bool,
}

#[async_trait]
impl EmbeddingProvider for FakeEmbedder {
    fn embedder_id(&self) -> &str {
        "fake"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors: Vec<Vec<f32>> = texts
            .iter()
            .map(|t| if t.contains("sport") { vec![10.0, 10.0] } else { vec![0.0, 0.0] })
            .collect();
        if self.drop_one {
            vectors.pop();
        }
        Ok(vectors)
    }
}

#[derive(Default)]
struct FakeInference {
    translate_calls: AtomicUsize,
}

#[async_trait]
impl InferenceProvider for FakeInference {
    async fn summarize(&self, text: &str) -> Result<String> {
        Ok(format!("summary of {}", text.split_whitespace().next().unwrap_or("")))
    }

    async fn sentiment(&self, _text: &str) -> Result<Vec<LabelScore>> {
        Ok(vec![
            LabelScore { label: "POSITIVE".into(), score: 0.97 },
            LabelScore { label: "NEGATIVE".into(), score: 0.03 },
        ])
    }

    async fn entities(&self, text: &str) -> Result<Vec<Entity>> {
        Ok(vec![Entity {
            entity_group: "MISC".into(),
            word: text.to_string(),
            score: 0.9,
            start: None,
            end: None,
        }])
    }

    async fn classify(&self, _text: &str, labels: &[String]) -> Result<Vec<LabelScore>> {
        assert_eq!(labels.len(), 8);
        Ok(vec![
            LabelScore { label: "Sports".into(), score: 0.812 },
            LabelScore { label: "Health".into(), score: 0.16 },
            LabelScore { label: "Science".into(), score: 0.028 },
        ])
    }

    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        self.translate_calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("[{source_lang}->{target_lang}] {text}"))
    }
}

struct FakeNews;

#[async_trait]
impl NewsSearch for FakeNews {
    async fn search(&self, query: &str) -> Result<Vec<NewsArticle>> {
        Ok(vec![NewsArticle {
            source: None,
            author: None,
            title: Some(format!("About {query}")),
            description: None,
            url: Some("https://wire.test/1".into()),
            url_to_image: None,
            published_at: None,
            content: None,
        }])
    }
}

const PAGES: &[(&str, &str, &str)] = &[
    ("q", "Stocks climb on earnings", "Stocks rose today amid strong earnings reports."),
    ("a", "Earnings lift markets", "Earnings season drove markets higher."),
    ("b", "Baking corner", "A recipe for chocolate cake."),
    ("s1", "Cup final", "The sport final drew a record crowd."),
    ("s2", "Marathon", "A sport event closed city roads."),
    ("e1", "Rates", "The bank held interest rates."),
    ("e2", "Jobs", "Hiring slowed across the economy."),
    ("e3", "Trade", "Exports fell for a third month."),
];

fn analyzer_with(embedder: FakeEmbedder, inference: Arc<FakeInference>, news: bool) -> NewsAnalyzer {
    let collaborators = Collaborators {
        fetcher: Arc::new(FakeFetcher::new(PAGES)),
        embedder: Arc::new(embedder),
        inference,
        news: if news { Some(Arc::new(FakeNews) as Arc<dyn NewsSearch>) } else { None },
    };
    NewsAnalyzer::new(collaborators, TopicSettings::default())
        .unwrap()
        .with_classification_model("test-model")
}

fn analyzer() -> NewsAnalyzer {
    analyzer_with(FakeEmbedder { drop_one: false }, Arc::new(FakeInference::default()), true)
}

fn urls(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn similar_articles_ranks_related_story_first() {
    let report = analyzer().similar_articles("q", &urls(&["b", "a"])).await.unwrap();
    assert_eq!(report.query_article.title, "Stocks climb on earnings");
    assert_eq!(report.query_article.similarity, 1.0);
    assert_eq!(report.similar_articles[0].url, "a");
    assert_eq!(report.similar_articles[0].title, "Earnings lift markets");
    assert!(report.similar_articles[0].similarity > report.similar_articles[1].similarity);
}

#[tokio::test]
async fn similar_articles_validates_input() {
    let a = analyzer();
    assert!(matches!(a.similar_articles("", &urls(&["a"])).await, Err(Error::Input(_))));
    assert!(matches!(a.similar_articles("q", &[]).await, Err(Error::Input(_))));
}

#[tokio::test]
async fn one_failed_fetch_fails_the_batch() {
    let result = analyzer().similar_articles("q", &urls(&["a", "missing"])).await;
    assert!(matches!(result, Err(Error::Fetch(_))));
}

#[tokio::test]
async fn five_documents_give_two_topics() {
    let report = analyzer().topics(&urls(&["s1", "e1", "s2", "e2", "e3"])).await.unwrap();
    assert_eq!(report.topics.len(), 2);
    assert_eq!(report.topics[0].topic, "Topic 1");
    assert_eq!(report.topics[1].topic, "Topic 2");
    let all: Vec<&String> = report.topics.iter().flat_map(|t| t.keywords.iter()).collect();
    assert!(all.iter().any(|k| k.as_str() == "sport"));
    assert!(report.topics.iter().all(|t| t.keywords.len() <= 5));
}

#[tokio::test]
async fn one_document_gives_one_topic() {
    let report = analyzer().topics(&urls(&["e1"])).await.unwrap();
    assert_eq!(report.topics.len(), 1);
    assert_eq!(report.topics[0].keywords, ["bank", "held", "interest", "rates"]);
}

#[tokio::test]
async fn embedding_count_mismatch_is_provider_error() {
    let a = analyzer_with(FakeEmbedder { drop_one: true }, Arc::new(FakeInference::default()), true);
    let result = a.topics(&urls(&["e1", "e2"])).await;
    assert!(matches!(result, Err(Error::Provider(_))));
}

#[tokio::test]
async fn keywords_come_from_headline() {
    let report = analyzer().keywords("a").await.unwrap();
    assert_eq!(report.title.as_deref(), Some("Earnings lift markets"));
    assert_eq!(report.keywords, ["earnings", "lift", "markets"]);
    assert_eq!(report.source_url.as_deref(), Some("a"));
}

#[tokio::test]
async fn sentiment_reports_top_label() {
    let report = analyzer().sentiment("a").await.unwrap();
    assert_eq!(report.sentiment, "POSITIVE");
    assert!((report.confidence - 0.97).abs() < 1e-6);
}

#[tokio::test]
async fn entities_run_on_the_summary() {
    let report = analyzer().entities("a").await.unwrap();
    assert_eq!(report.content, "summary of Earnings");
    assert_eq!(report.entities[0].word, "summary of Earnings");
}

#[tokio::test]
async fn classification_keeps_secondary_above_threshold() {
    let report = analyzer().classify("s1").await.unwrap();
    assert_eq!(report.category.primary_category.category, "Sports");
    assert_eq!(report.category.primary_category.confidence, 0.81);
    assert_eq!(report.category.secondary_categories.len(), 1);
    assert_eq!(report.category.secondary_categories[0].category, "Health");
    assert_eq!(report.category.classification_model, "test-model");
}

#[tokio::test]
async fn translate_summarises_then_translates_from_english() {
    let report = analyzer().translate("a", "fr").await.unwrap();
    assert_eq!(report.original_text, "summary of Earnings");
    assert_eq!(report.translated_text, "[en->fr] summary of Earnings");
}

#[tokio::test]
async fn unsupported_language_is_rejected_before_translation() {
    let inference = Arc::new(FakeInference::default());
    let a = analyzer_with(FakeEmbedder { drop_one: false }, inference.clone(), true);
    let result = a.translate("a", "xx").await;
    assert!(matches!(result, Err(Error::Input(_))));
    assert_eq!(inference.translate_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn search_requires_configured_news_client() {
    let report = analyzer().search("climate").await.unwrap();
    assert_eq!(report.matching_articles[0].title.as_deref(), Some("About climate"));

    let offline = analyzer_with(FakeEmbedder { drop_one: false }, Arc::new(FakeInference::default()), false);
    assert!(matches!(offline.search("climate").await, Err(Error::InvalidConfig(_))));
    assert!(matches!(offline.search(" ").await, Err(Error::Input(_))));
}

#[test]
fn keywords_for_texts_has_no_source() {
    let report = analyzer().keywords_for_texts("the cat sat on the mat");
    assert_eq!(report.keywords, ["cat", "sat", "mat"]);
    assert!(report.title.is_none());
}
