//! `newslens` entry point.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};

use newslens_core::config::{Config, EmbeddingBackend, Settings};
use newslens_core::corpus::{load_corpus, load_document, same_file};
use newslens_core::traits::{EmbeddingProvider, NewsSearch};
use newslens_embed::HashingEmbedder;
use newslens_engine::{Collaborators, NewsAnalyzer};
use newslens_remote::{HuggingFaceClient, JsonLdFetcher, NewsApiClient};
use newslens_text::Preprocessor;

mod cli;

use cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over -v
    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let config = Config::load_with(args.config.as_deref()).context("failed to load configuration")?;
    let settings = config.settings().context("invalid configuration")?;
    let analyzer = build_analyzer(&settings, &args.command)?;

    let output = run(&analyzer, args.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn build_analyzer(settings: &Settings, command: &Command) -> Result<NewsAnalyzer> {
    let hf = Arc::new(HuggingFaceClient::new(&settings.inference).context("failed to create inference client")?);
    let embedder: Arc<dyn EmbeddingProvider> = match settings.embedding.provider {
        EmbeddingBackend::Remote if !command.is_offline() => hf.clone() as Arc<dyn EmbeddingProvider>,
        // local commands stay off the network
        _ => Arc::new(HashingEmbedder::new(Preprocessor::new()?, settings.embedding.dimension)?),
    };
    let news: Option<Arc<dyn NewsSearch>> = match settings.news_search.configured_api_key() {
        Some(_) => Some(Arc::new(NewsApiClient::new(&settings.news_search, &settings.fetch)?)),
        None => None,
    };
    info!(embedder = embedder.embedder_id(), news_search = news.is_some(), "collaborators ready");

    let collaborators = Collaborators {
        fetcher: Arc::new(JsonLdFetcher::new(&settings.fetch)?),
        embedder,
        inference: hf,
        news,
    };
    Ok(NewsAnalyzer::new(collaborators, settings.topics.clone())?
        .with_classification_model(settings.inference.classification_model.clone()))
}

fn json<T: Serialize>(report: T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(report)?)
}

async fn run(analyzer: &NewsAnalyzer, command: Command) -> Result<serde_json::Value> {
    match command {
        Command::Similar { query, urls } => json(analyzer.similar_articles(&query, &urls).await?),
        Command::Topics { urls } => json(analyzer.topics(&urls).await?),
        Command::Keywords { url } => json(analyzer.keywords(&url).await?),
        Command::Summarize { url } => json(analyzer.summarize(&url).await?),
        Command::Sentiment { url } => json(analyzer.sentiment(&url).await?),
        Command::Entities { url } => json(analyzer.entities(&url).await?),
        Command::Classify { url } => json(analyzer.classify(&url).await?),
        Command::Translate { url, to } => json(analyzer.translate(&url, &to).await?),
        Command::Search { query } => json(analyzer.search(&query).await?),
        Command::SimilarDir { query, dir } => {
            let query = load_document(&query).with_context(|| format!("failed to read {}", query.display()))?;
            let candidates: Vec<_> = load_corpus(&dir)?
                .into_iter()
                .filter(|d| !same_file(Path::new(&d.url), Path::new(&query.url)))
                .collect();
            json(analyzer.similar_documents(&query, &candidates)?)
        }
        Command::TopicsDir { dir } => {
            let texts: Vec<String> = load_corpus(&dir)?.into_iter().map(|d| d.text).collect();
            json(analyzer.topics_for_texts(&texts).await?)
        }
        Command::KeywordsText { text } => json(analyzer.keywords_for_texts(text)),
    }
}
