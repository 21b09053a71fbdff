//! Layered configuration loader.
//!
//! Uses Figment to merge built-in defaults + `newslens.toml` +
//! `newslens.<env>.toml` + the well-known API key variables + `APP_*` env vars
//! (nested with `__`, e.g. `APP_TOPICS__SEED=7`). The resulting [`Settings`]
//! are passed explicitly to every component that needs them.
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_with(None)
    }

    /// Same as [`Config::load`] with an extra TOML file merged after the
    /// environment-specific one.
    pub fn load_with(extra: Option<&Path>) -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("newslens.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("newslens.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("newslens.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("newslens.test.toml")),
            _ => {}
        }
        if let Some(path) = extra {
            if !path.exists() {
                return Err(Error::InvalidConfig(format!("config file '{}' does not exist", path.display())));
            }
            figment = figment.merge(Toml::file(path));
        }
        figment = figment
            .merge(Env::raw().only(&["HUGGING_FACE_API_KEY"]).map(|_| "inference.api_key".into()))
            .merge(Env::raw().only(&["NEWS_API_KEY"]).map(|_| "news_search.api_key".into()))
            .merge(Env::prefixed("APP_").split("__"));

        tracing::debug!(env = %env_name, "configuration sources merged");
        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    /// Extracts and validates the full typed settings tree.
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub inference: InferenceSettings,
    pub news_search: NewsSearchSettings,
    pub fetch: FetchSettings,
    pub embedding: EmbeddingSettings,
    pub topics: TopicSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.topics.max_topics == 0 {
            return Err(Error::InvalidConfig("topics.max_topics must be at least 1".into()));
        }
        if self.topics.keywords_per_topic == 0 {
            return Err(Error::InvalidConfig("topics.keywords_per_topic must be at least 1".into()));
        }
        if self.topics.max_iterations == 0 {
            return Err(Error::InvalidConfig("topics.max_iterations must be at least 1".into()));
        }
        if self.embedding.dimension == 0 {
            return Err(Error::InvalidConfig("embedding.dimension must be at least 1".into()));
        }
        if self.inference.base_url.trim().is_empty() {
            return Err(Error::InvalidConfig("inference.base_url is empty".into()));
        }
        Ok(())
    }
}

/// Hosted model endpoints and the model id used for each task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub summarization_model: String,
    pub sentiment_model: String,
    pub ner_model: String,
    pub classification_model: String,
    pub translation_model: String,
    pub embedding_model: String,
    pub timeout_secs: u64,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api-inference.huggingface.co".to_string(),
            api_key: None,
            summarization_model: "facebook/bart-large-cnn".to_string(),
            sentiment_model: "distilbert/distilbert-base-uncased-finetuned-sst-2-english".to_string(),
            ner_model: "dslim/distilbert-NER".to_string(),
            classification_model: "facebook/bart-large-mnli".to_string(),
            translation_model: "facebook/nllb-200-distilled-600M".to_string(),
            embedding_model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsSearchSettings {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for NewsSearchSettings {
    fn default() -> Self {
        Self { base_url: "https://newsapi.org/v2".to_string(), api_key: None }
    }
}

impl NewsSearchSettings {
    /// The API key, unless it is missing or blank (`NEWS_API_KEY=`).
    pub fn configured_api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("newslens/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Hosted feature-extraction model.
    Remote,
    /// Local deterministic feature hashing; no network.
    Hashing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    pub provider: EmbeddingBackend,
    pub dimension: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self { provider: EmbeddingBackend::Remote, dimension: 384 }
    }
}

/// Knobs for topic grouping.
///
/// `max_topics = 2` reproduces the fixed cluster cap; raising it is an
/// explicit opt-in. `rank_keywords` switches from first-seen keyword order to
/// frequency order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicSettings {
    pub max_topics: usize,
    pub keywords_per_topic: usize,
    pub seed: u64,
    pub max_iterations: usize,
    pub rank_keywords: bool,
}

impl Default for TopicSettings {
    fn default() -> Self {
        Self { max_topics: 2, keywords_per_topic: 5, seed: 42, max_iterations: 100, rank_keywords: false }
    }
}
