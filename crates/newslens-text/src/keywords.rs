//! Keyword extraction over preprocessed text.
//!
//! [`extract_keywords`] is a presence set: filtered tokens, deduplicated, in
//! first-seen order, with no frequency signal. [`rank_keywords_by_frequency`]
//! is the opt-in alternative that orders the same tokens by count.

use std::collections::{HashMap, HashSet};

use tracing::instrument;

use crate::analyzer::Preprocessor;

/// One text or many. Both are treated as a sequence of texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordInput {
    Text(String),
    Texts(Vec<String>),
}

impl KeywordInput {
    pub fn into_texts(self) -> Vec<String> {
        match self {
            Self::Text(text) => vec![text],
            Self::Texts(texts) => texts,
        }
    }
}

impl From<&str> for KeywordInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for KeywordInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for KeywordInput {
    fn from(texts: Vec<String>) -> Self {
        Self::Texts(texts)
    }
}

impl From<&[String]> for KeywordInput {
    fn from(texts: &[String]) -> Self {
        Self::Texts(texts.to_vec())
    }
}

/// Unique keyword tokens across all inputs, in first-seen order.
///
/// Callers wanting a "top N" truncate the result themselves.
#[instrument(skip_all)]
pub fn extract_keywords(preprocessor: &Preprocessor, input: impl Into<KeywordInput>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();
    for text in input.into().into_texts() {
        for token in preprocessor.keyword_tokens(&text) {
            if seen.insert(token.clone()) {
                keywords.push(token);
            }
        }
    }
    keywords
}

/// The same token set as [`extract_keywords`], ordered by descending count.
/// Ties keep first-seen order.
#[instrument(skip_all, fields(texts = texts.len()))]
pub fn rank_keywords_by_frequency(preprocessor: &Preprocessor, texts: &[String]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order = Vec::new();
    for text in texts {
        for token in preprocessor.keyword_tokens(text) {
            let count = counts.entry(token.clone()).or_insert(0);
            if *count == 0 {
                order.push(token);
            }
            *count += 1;
        }
    }
    // stable sort keeps first-seen order among equal counts
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pre() -> Preprocessor {
        Preprocessor::new().unwrap()
    }

    #[test]
    fn single_sentence_in_first_seen_order() {
        let keywords = extract_keywords(&pre(), "the cat sat on the mat");
        assert_eq!(keywords, ["cat", "sat", "mat"]);
    }

    #[test]
    fn repeated_words_are_deduplicated() {
        let keywords = extract_keywords(&pre(), "the cat sat on the mat; the cat sat again");
        assert_eq!(keywords, ["cat", "sat", "mat"]);
    }

    #[test]
    fn multiple_texts_share_one_set() {
        let texts = vec!["Solar power grows".to_string(), "power grid and solar farms".to_string()];
        let keywords = extract_keywords(&pre(), texts);
        assert_eq!(keywords, ["solar", "power", "grows", "grid", "farms"]);
    }

    #[test]
    fn case_is_folded_before_dedup() {
        let keywords = extract_keywords(&pre(), "Budget BUDGET budget");
        assert_eq!(keywords, ["budget"]);
    }

    #[test]
    fn empty_input_gives_empty_keywords() {
        assert!(extract_keywords(&pre(), "").is_empty());
        assert!(extract_keywords(&pre(), Vec::<String>::new()).is_empty());
    }

    #[test]
    fn string_and_one_element_sequence_agree() {
        let p = pre();
        let single = extract_keywords(&p, "Election results announced tonight");
        let sequence = extract_keywords(&p, vec!["Election results announced tonight".to_string()]);
        assert_eq!(single, sequence);
    }

    #[test]
    fn frequency_ranking_orders_by_count_then_first_seen() {
        let texts = vec![
            "rates rates inflation".to_string(),
            "inflation rates bank".to_string(),
            "bank policy".to_string(),
        ];
        let ranked = rank_keywords_by_frequency(&pre(), &texts);
        assert_eq!(ranked, ["rates", "inflation", "bank", "policy"]);
    }

    #[test]
    fn frequency_ranking_has_same_members_as_presence_set() {
        let p = pre();
        let texts = vec!["alpha beta gamma beta".to_string(), "delta alpha".to_string()];
        let mut ranked = rank_keywords_by_frequency(&p, &texts);
        let mut plain = extract_keywords(&p, texts);
        ranked.sort();
        plain.sort();
        assert_eq!(ranked, plain);
    }
}
