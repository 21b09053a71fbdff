use tantivy::tokenizer::{LowerCaser, RegexTokenizer, StopWordFilter, TextAnalyzer, TokenStream};

use newslens_core::error::{Error, Result};

/// Tokens shorter than this are dropped from keyword sets (but not from
/// TF-IDF input).
pub const MIN_KEYWORD_LEN: usize = 3;

/// Splits on any run of non-word characters.
const WORD_PATTERN: &str = r"\w+";

/// Fixed English stopword list.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "whose", "this", "that", "these", "those", "am", "is", "are", "was", "were",
    "be", "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "would",
    "should", "could", "ought", "will", "shall", "may", "might", "must", "can", "a", "an", "the",
    "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for", "with",
    "about", "against", "between", "into", "through", "during", "before", "after", "above",
    "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how", "all", "any",
    "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only",
    "own", "same", "so", "than", "too", "very", "just", "also", "s", "t", "d", "ll", "m", "o",
    "re", "ve", "y", "don", "now", "said", "says",
];

/// Lowercases, tokenizes on word boundaries and strips stopwords.
///
/// Pure: the output depends only on the input text and the fixed stopword
/// list. Cloning is cheap enough to build one per request.
#[derive(Clone)]
pub struct Preprocessor {
    analyzer: TextAnalyzer,
}

impl std::fmt::Debug for Preprocessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preprocessor").field("stop_words", &ENGLISH_STOP_WORDS.len()).finish()
    }
}

impl Preprocessor {
    pub fn new() -> Result<Self> {
        let tokenizer = RegexTokenizer::new(WORD_PATTERN)
            .map_err(|e| Error::Computation(format!("invalid token pattern: {e}")))?;
        let analyzer = TextAnalyzer::builder(tokenizer)
            .filter(LowerCaser)
            .filter(StopWordFilter::remove(ENGLISH_STOP_WORDS.iter().map(|w| (*w).to_string())))
            .build();
        Ok(Self { analyzer })
    }

    /// Tokens in text order, duplicates kept. No length filter.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let mut analyzer = self.analyzer.clone();
        let mut stream = analyzer.token_stream(text);
        let mut tokens = Vec::new();
        while stream.advance() {
            tokens.push(stream.token().text.clone());
        }
        tokens
    }

    /// [`Preprocessor::tokens`] minus anything shorter than [`MIN_KEYWORD_LEN`].
    pub fn keyword_tokens(&self, text: &str) -> Vec<String> {
        self.tokens(text)
            .into_iter()
            .filter(|t| t.chars().count() >= MIN_KEYWORD_LEN)
            .collect()
    }
}
