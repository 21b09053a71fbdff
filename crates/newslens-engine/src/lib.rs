//! newslens-engine
//!
//! Topic grouping on top of the vector crate, and [`NewsAnalyzer`], which
//! wires injected collaborators into each news operation.

pub mod analyzer;
pub mod classify;
pub mod topics;

pub use analyzer::{Collaborators, NewsAnalyzer};
pub use classify::{build_classification, news_categories, NEWS_CATEGORIES, SECONDARY_THRESHOLD};
pub use topics::{cluster_count, group_into_topics};
