//! Client for the Hugging Face hosted inference API.
//!
//! Every task is a `POST {base_url}/models/{model}` with an `inputs` payload.
//! Response shapes differ between models and API versions, so each one is
//! decoded through an untagged enum covering the variants seen in practice.

use std::cmp::Ordering;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use newslens_core::config::InferenceSettings;
use newslens_core::error::{Error, Result};
use newslens_core::languages::language_code;
use newslens_core::traits::{EmbeddingProvider, InferenceProvider};
use newslens_core::types::{Entity, LabelScore};
use newslens_embed::mean_pool;

use crate::client::{base_url, build_http_client};

pub const EMPTY_SUMMARY: &str = "No summary available.";

const TRANSLATION_MAX_LENGTH: u32 = 512;
const TRANSLATION_NUM_BEAMS: u32 = 4;
const TRANSLATION_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    client: Client,
    base_url: String,
    settings: InferenceSettings,
    embedder_id: String,
}

#[derive(Debug, Deserialize)]
struct SummaryItem {
    #[serde(default)]
    summary_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SummaryResponse {
    Many(Vec<SummaryItem>),
    One(SummaryItem),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SentimentResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

#[derive(Debug, Deserialize)]
struct ZeroShotItem {
    labels: Vec<String>,
    scores: Vec<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    One(ZeroShotItem),
    Many(Vec<ZeroShotItem>),
}

#[derive(Debug, Deserialize)]
struct TranslationItem {
    #[serde(default)]
    translation_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmbeddingResponse {
    /// One pooled vector per input.
    Pooled(Vec<Vec<f32>>),
    /// `[text][token][hidden]`, pooled client-side.
    TokenLevel(Vec<Vec<Vec<f32>>>),
    /// A single input answered with a bare vector.
    Single(Vec<f32>),
}

impl HuggingFaceClient {
    pub fn new(settings: &InferenceSettings) -> Result<Self> {
        let client = build_http_client(
            settings.timeout_secs,
            concat!("newslens/", env!("CARGO_PKG_VERSION")),
            settings.api_key.as_deref(),
        )?;
        Ok(Self {
            client,
            base_url: base_url(&settings.base_url),
            embedder_id: format!("hf:{}", settings.embedding_model),
            settings: settings.clone(),
        })
    }

    async fn post_model<T: DeserializeOwned>(&self, model: &str, payload: &Value) -> Result<T> {
        let url = format!("{}/models/{}", self.base_url, model);
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("{model}: request failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(Error::Provider(format!("{model} returned {status}: {body}")));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| Error::Provider(format!("{model}: unexpected response: {e}")))
    }
}

fn sort_by_score(labels: &mut [LabelScore]) {
    labels.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

#[async_trait]
impl InferenceProvider for HuggingFaceClient {
    #[instrument(skip_all, fields(model = %self.settings.summarization_model, chars = text.len()))]
    async fn summarize(&self, text: &str) -> Result<String> {
        let response: SummaryResponse = self
            .post_model(&self.settings.summarization_model, &json!({ "inputs": text }))
            .await?;
        let summary = match response {
            SummaryResponse::Many(items) => items.into_iter().next().and_then(|i| i.summary_text),
            SummaryResponse::One(item) => item.summary_text,
        };
        Ok(summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| EMPTY_SUMMARY.to_string()))
    }

    #[instrument(skip_all, fields(model = %self.settings.sentiment_model))]
    async fn sentiment(&self, text: &str) -> Result<Vec<LabelScore>> {
        let response: SentimentResponse = self
            .post_model(&self.settings.sentiment_model, &json!({ "inputs": text }))
            .await?;
        let mut labels = match response {
            SentimentResponse::Nested(rows) => rows.into_iter().next().unwrap_or_default(),
            SentimentResponse::Flat(labels) => labels,
        };
        sort_by_score(&mut labels);
        Ok(labels)
    }

    #[instrument(skip_all, fields(model = %self.settings.ner_model))]
    async fn entities(&self, text: &str) -> Result<Vec<Entity>> {
        let entities: Vec<Entity> = self
            .post_model(&self.settings.ner_model, &json!({ "inputs": text }))
            .await?;
        debug!(count = entities.len(), "entities recognised");
        Ok(entities)
    }

    #[instrument(skip_all, fields(model = %self.settings.classification_model, labels = labels.len()))]
    async fn classify(&self, text: &str, labels: &[String]) -> Result<Vec<LabelScore>> {
        let payload = json!({ "inputs": text, "parameters": { "candidate_labels": labels, "multi_label": false } });
        let response: ZeroShotResponse = self
            .post_model(&self.settings.classification_model, &payload)
            .await?;
        let item = match response {
            ZeroShotResponse::One(item) => item,
            ZeroShotResponse::Many(items) => items
                .into_iter()
                .next()
                .ok_or_else(|| Error::Provider("zero-shot response was empty".into()))?,
        };
        if item.labels.len() != item.scores.len() {
            return Err(Error::Provider(format!(
                "zero-shot response has {} labels but {} scores",
                item.labels.len(),
                item.scores.len()
            )));
        }
        let mut scored: Vec<LabelScore> = item
            .labels
            .into_iter()
            .zip(item.scores)
            .map(|(label, score)| LabelScore { label, score })
            .collect();
        sort_by_score(&mut scored);
        Ok(scored)
    }

    #[instrument(skip_all, fields(model = %self.settings.translation_model, from = source_lang, to = target_lang))]
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        let payload = json!({
            "inputs": text,
            "parameters": {
                "max_length": TRANSLATION_MAX_LENGTH,
                "temperature": TRANSLATION_TEMPERATURE,
                "num_beams": TRANSLATION_NUM_BEAMS,
                "early_stopping": true,
                "src_lang": language_code(source_lang)?,
                "tgt_lang": language_code(target_lang)?,
            }
        });
        let items: Vec<TranslationItem> = self
            .post_model(&self.settings.translation_model, &payload)
            .await?;
        items
            .into_iter()
            .next()
            .and_then(|i| i.translation_text)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::Provider("No translation received from the model".into()))
    }
}

#[async_trait]
impl EmbeddingProvider for HuggingFaceClient {
    fn embedder_id(&self) -> &str {
        &self.embedder_id
    }

    #[instrument(skip_all, fields(model = %self.settings.embedding_model, texts = texts.len()))]
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let response: EmbeddingResponse = self
            .post_model(&self.settings.embedding_model, &json!({ "inputs": texts }))
            .await?;
        let vectors = match response {
            EmbeddingResponse::Pooled(vectors) => vectors,
            EmbeddingResponse::TokenLevel(matrices) => matrices
                .iter()
                .map(|tokens| mean_pool(tokens))
                .collect::<Result<Vec<_>>>()?,
            EmbeddingResponse::Single(vector) => vec![vector],
        };
        debug!(count = vectors.len(), "embeddings received");
        Ok(vectors)
    }
}
