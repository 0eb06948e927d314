//! Text processing utilities for query terms

use std::collections::HashSet;
use std::sync::OnceLock;

/// Common English stop words dropped from queries
static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

fn get_stop_words() -> &'static HashSet<&'static str> {
    STOP_WORDS.get_or_init(|| {
        [
            "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into",
            "is", "it", "no", "not", "of", "on", "or", "such", "that", "the", "their", "then",
            "there", "these", "they", "this", "to", "was", "will", "with",
        ]
        .iter()
        .copied()
        .collect()
    })
}

pub fn is_stop_word(term: &str) -> bool {
    get_stop_words().contains(term)
}

/// Split a query word into lowercase index terms.
///
/// Splits on every non-alphanumeric character, the same boundaries the
/// index tokenizer uses, so each term can match an indexed token.
pub fn split_terms(word: &str) -> Vec<String> {
    word.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
