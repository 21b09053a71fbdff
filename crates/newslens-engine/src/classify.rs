use std::cmp::Ordering;

use chrono::{DateTime, SecondsFormat, Utc};

use newslens_core::error::{Error, Result};
use newslens_core::types::{CategoryScore, Classification, LabelScore};
use newslens_vector::round_score;

/// Candidate labels for zero-shot news classification.
pub const NEWS_CATEGORIES: [&str; 8] = [
    "Technology",
    "Business",
    "Politics",
    "Entertainment",
    "Sports",
    "Health",
    "Science",
    "World News",
];

/// Non-primary labels must score above this to be listed.
pub const SECONDARY_THRESHOLD: f32 = 0.15;

pub fn news_categories() -> Vec<String> {
    NEWS_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

/// Turns zero-shot scores into a primary category plus the secondary
/// categories above [`SECONDARY_THRESHOLD`].
///
/// Only the primary confidence is rounded.
pub fn build_classification(scores: &[LabelScore], model: &str, at: DateTime<Utc>) -> Result<Classification> {
    let mut ranked = scores.to_vec();
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    let mut ranked = ranked.into_iter();
    let top = ranked
        .next()
        .ok_or_else(|| Error::Provider("classification returned no labels".into()))?;

    Ok(Classification {
        primary_category: CategoryScore { category: top.label, confidence: round_score(top.score) },
        secondary_categories: ranked
            .filter(|l| l.score > SECONDARY_THRESHOLD)
            .map(|l| CategoryScore { category: l.label, confidence: l.score })
            .collect(),
        classification_model: model.to_string(),
        timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
