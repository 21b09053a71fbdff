use std::cmp::Ordering;

use tracing::{debug, instrument};

use newslens_core::error::{Error, Result};
use newslens_core::types::{Document, ScoredArticle, SimilarityReport};
use newslens_text::Preprocessor;

use crate::tfidf::build_vectors;

/// Cosine of the angle between `a` and `b`.
///
/// Returns 0.0 when the lengths differ, when either vector is empty, or when
/// either vector has zero norm (an all-stopword document).
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Rounds a score to 2 decimal places for reporting.
pub fn round_score(score: f32) -> f32 {
    (score * 100.0).round() / 100.0
}

/// Ranks `candidates` by TF-IDF cosine similarity to `query`.
///
/// The query and candidates share one vocabulary. Sorting is stable and uses
/// full precision; only the reported scores are rounded. The query itself is
/// reported with a fixed similarity of 1.0.
#[instrument(skip_all, fields(candidates = candidates.len()))]
pub fn rank_similar_articles(
    preprocessor: &Preprocessor,
    query: &Document,
    candidates: &[Document],
) -> Result<SimilarityReport> {
    if query.text.trim().is_empty() {
        return Err(Error::Input("query article text is required".into()));
    }
    if candidates.is_empty() {
        return Err(Error::Input("at least one candidate article is required".into()));
    }

    let texts: Vec<&str> = std::iter::once(query.text.as_str())
        .chain(candidates.iter().map(|c| c.text.as_str()))
        .collect();
    let matrix = build_vectors(preprocessor, &texts);
    let (query_vector, candidate_vectors) = matrix
        .vectors
        .split_first()
        .ok_or_else(|| Error::Computation("tf-idf matrix has no query row".into()))?;

    let mut scored: Vec<(&Document, f64)> = candidates
        .iter()
        .zip(candidate_vectors)
        .map(|(doc, vector)| (doc, cosine_similarity(query_vector, vector)))
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    let similar_articles = scored
        .into_iter()
        .map(|(doc, score)| ScoredArticle {
            title: doc.title.clone(),
            url: doc.url.clone(),
            similarity: round_score(score as f32),
        })
        .collect();

    debug!(terms = matrix.vocabulary.len(), "ranked candidates");
    Ok(SimilarityReport {
        query_article: ScoredArticle { title: query.title.clone(), url: query.url.clone(), similarity: 1.0 },
        similar_articles,
    })
}
