//! TF-IDF vectors over a request-scoped vocabulary.
//!
//! Weights use raw term counts and the smoothed inverse document frequency
//! `idf(t) = 1 + ln(N / (1 + df(t)))`, which stays positive for every
//! `df(t) <= N`.

use std::collections::HashMap;

use tracing::{debug, instrument};

use newslens_text::Preprocessor;

/// Vectors for one document set. `vectors[i]` belongs to input document `i`
/// and every vector has `vocabulary.len()` entries. Weights are kept in `f64`
/// so near-ties survive until the reported scores are rounded.
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfMatrix {
    pub vocabulary: Vec<String>,
    pub vectors: Vec<Vec<f64>>,
}

impl TfIdfMatrix {
    pub fn dims(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Builds one TF-IDF vector per document over the union of their terms.
///
/// The vocabulary is ordered by first appearance (document order, then token
/// order), so the same inputs always produce the same matrix.
#[instrument(skip_all, fields(documents = documents.len()))]
pub fn build_vectors<S: AsRef<str>>(preprocessor: &Preprocessor, documents: &[S]) -> TfIdfMatrix {
    let mut vocabulary: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut term_counts: Vec<HashMap<usize, usize>> = Vec::with_capacity(documents.len());

    for doc in documents {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for token in preprocessor.tokens(doc.as_ref()) {
            let idx = match index.get(&token) {
                Some(&idx) => idx,
                None => {
                    let idx = vocabulary.len();
                    index.insert(token.clone(), idx);
                    vocabulary.push(token);
                    idx
                }
            };
            *counts.entry(idx).or_insert(0) += 1;
        }
        term_counts.push(counts);
    }

    let mut doc_freq = vec![0usize; vocabulary.len()];
    for counts in &term_counts {
        for &idx in counts.keys() {
            doc_freq[idx] += 1;
        }
    }

    let n = documents.len() as f64;
    let idf: Vec<f64> = doc_freq.iter().map(|&df| 1.0 + (n / (1.0 + df as f64)).ln()).collect();

    let vectors = term_counts
        .iter()
        .map(|counts| {
            let mut vector = vec![0.0f64; vocabulary.len()];
            for (&idx, &count) in counts {
                vector[idx] = count as f64 * idf[idx];
            }
            vector
        })
        .collect();

    debug!(terms = vocabulary.len(), "built tf-idf matrix");
    TfIdfMatrix { vocabulary, vectors }
}
