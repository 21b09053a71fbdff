//! newslens-text
//!
//! Text normalisation shared by the similarity and topic engines: a tantivy
//! analyzer chain (word tokenizer, lowercasing, English stopwords) and the
//! keyword extractor built on top of it.
pub mod analyzer;
pub mod keywords;

pub use analyzer::{Preprocessor, ENGLISH_STOP_WORDS, MIN_KEYWORD_LEN};
pub use keywords::{extract_keywords, rank_keywords_by_frequency, KeywordInput};
