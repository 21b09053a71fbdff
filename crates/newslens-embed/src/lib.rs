//! newslens-embed
//!
//! Offline embedding support: a deterministic feature-hashing provider for
//! development and tests, plus pooling helpers for token-level model output.
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use tracing::{debug, instrument};
use twox_hash::XxHash64;

use newslens_core::error::{Error, Result};
use newslens_core::traits::EmbeddingProvider;
use newslens_text::Preprocessor;

pub mod pool;

pub use pool::{l2_normalize, mean_pool};

/// Hashes preprocessed tokens into a fixed number of signed buckets.
///
/// Texts sharing vocabulary land close together, which is enough for topic
/// grouping without a hosted model. Output is L2-normalised; a text with no
/// surviving tokens maps to the zero vector.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    preprocessor: Preprocessor,
    dim: usize,
    id: String,
}

impl HashingEmbedder {
    pub fn new(preprocessor: Preprocessor, dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidConfig("hashing embedder needs at least one dimension".into()));
        }
        Ok(Self { preprocessor, dim, id: format!("hashing:d{dim}") })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        for token in self.preprocessor.tokens(text) {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h % self.dim as u64) as usize;
            let sign = if (h >> 63) == 0 { 1.0 } else { -1.0 };
            v[idx] += sign;
        }
        l2_normalize(&mut v);
        v
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    fn embedder_id(&self) -> &str {
        &self.id
    }

    #[instrument(skip_all, fields(texts = texts.len(), dim = self.dim))]
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let vectors: Vec<Vec<f32>> = texts.iter().map(|t| self.embed_text(t)).collect();
        debug!("hashed {} texts", vectors.len());
        Ok(vectors)
    }
}
