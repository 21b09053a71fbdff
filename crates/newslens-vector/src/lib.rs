//! newslens-vector
//!
//! Vector-space math over request-scoped inputs: TF-IDF construction, cosine
//! similarity ranking and seeded k-means clustering. Nothing here performs
//! I/O or keeps state between calls.
pub mod kmeans;
pub mod similarity;
pub mod tfidf;

pub use kmeans::{Clustering, KMeans};
pub use similarity::{cosine_similarity, rank_similar_articles, round_score};
pub use tfidf::{build_vectors, TfIdfMatrix};
