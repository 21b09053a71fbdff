//! Topic grouping: cluster documents by embedding, then label each cluster
//! with keywords drawn from its member texts.

use tracing::{debug, instrument};

use newslens_core::config::TopicSettings;
use newslens_core::error::{Error, Result};
use newslens_core::types::{Topic, TopicReport};
use newslens_text::{extract_keywords, rank_keywords_by_frequency, Preprocessor};
use newslens_vector::KMeans;

/// Number of clusters for `documents` inputs: half the documents (at least
/// one), capped at `max_topics`.
///
/// With the default cap of 2: one to three documents give one topic, four or
/// more give two.
pub fn cluster_count(documents: usize, max_topics: usize) -> usize {
    let by_size = (documents / 2).max(1);
    max_topics.max(1).min(by_size)
}

/// Groups `texts` into labelled topics using one embedding per text.
///
/// A single cluster skips k-means entirely. Clusters that end up empty are
/// still reported, with no keywords.
#[instrument(skip_all, fields(texts = texts.len()))]
pub fn group_into_topics(
    preprocessor: &Preprocessor,
    texts: &[String],
    embeddings: &[Vec<f32>],
    settings: &TopicSettings,
) -> Result<TopicReport> {
    if texts.is_empty() {
        return Err(Error::Input("no texts provided for topic modeling".into()));
    }
    if embeddings.len() != texts.len() {
        return Err(Error::Computation(format!(
            "{} embeddings for {} texts",
            embeddings.len(),
            texts.len()
        )));
    }

    let k = cluster_count(texts.len(), settings.max_topics);
    let groups = if k > 1 {
        KMeans::new(k)
            .with_seed(settings.seed)
            .with_max_iterations(settings.max_iterations)
            .fit(embeddings)?
            .groups()
    } else {
        vec![(0..texts.len()).collect()]
    };
    debug!(k, "documents grouped");

    let topics = groups
        .iter()
        .enumerate()
        .map(|(i, members)| {
            let member_texts: Vec<String> = members.iter().map(|&m| texts[m].clone()).collect();
            let mut keywords = if settings.rank_keywords {
                rank_keywords_by_frequency(preprocessor, &member_texts)
            } else {
                extract_keywords(preprocessor, member_texts)
            };
            keywords.truncate(settings.keywords_per_topic);
            Topic { topic: format!("Topic {}", i + 1), keywords }
        })
        .collect();
    Ok(TopicReport { topics })
}
