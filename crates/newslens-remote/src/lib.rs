//! newslens-remote
//!
//! HTTP-backed implementations of the collaborator traits in
//! `newslens_core::traits`: article pages, hosted model inference and a
//! third-party news index.

mod client;
pub mod fetcher;
pub mod huggingface;
pub mod news_api;

pub use fetcher::{parse_article, JsonLdFetcher};
pub use huggingface::HuggingFaceClient;
pub use news_api::NewsApiClient;
