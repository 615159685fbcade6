//! Keyword relevance filtering
//!
//! Every relevance decision in the crawler goes through [`tokenize_and_clean`]:
//! the keyword set, whole-page checks and per-sentence checks all use the same
//! tokenization, otherwise keyword matches would be meaningless.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::utils::constants::STOP_WORDS;

/// Word tokens: runs of Unicode word characters.
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("WORD_RE: hardcoded regex is valid"));

/// Sentence boundary: terminal punctuation followed by whitespace.
static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("SENTENCE_END_RE: hardcoded regex is valid"));

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

/// Lowercase, deduplicated, stop-word-filtered tokens of `text`.
#[must_use]
pub fn tokenize_and_clean(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !STOP_WORD_SET.contains(token))
        .map(str::to_owned)
        .collect()
}

/// The crawl-wide set of cleaned keyword tokens.
///
/// Built once before the crawl starts and shared read-only by all workers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    tokens: HashSet<String>,
}

impl KeywordSet {
    /// Build a keyword set from raw terms (single words or phrases).
    ///
    /// Phrases are split into words; the result is cleaned with
    /// [`tokenize_and_clean`].
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = HashSet::new();
        for term in terms {
            tokens.extend(tokenize_and_clean(term.as_ref()));
        }
        Self { tokens }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// True iff at least one token of `other` is a keyword.
    #[must_use]
    pub fn intersects(&self, other: &HashSet<String>) -> bool {
        // Iterate the smaller side
        if other.len() < self.tokens.len() {
            other.iter().any(|t| self.tokens.contains(t))
        } else {
            self.tokens.iter().any(|t| other.contains(t))
        }
    }

    /// Keywords in sorted order, for logging and display.
    #[must_use]
    pub fn sorted(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.tokens.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}

/// True iff the cleaned tokens of `text` share at least one keyword.
#[must_use]
pub fn is_page_relevant(text: &str, keywords: &KeywordSet) -> bool {
    keywords.intersects(&tokenize_and_clean(text))
}

/// Split `text` into sentences at `.`, `!` or `?` followed by whitespace.
///
/// The punctuation stays with its sentence. Abbreviations and decimals
/// followed by a space are mis-split; that approximation is accepted.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for boundary in SENTENCE_END_RE.find_iter(text) {
        // punctuation is a single ASCII byte
        let end = boundary.start() + 1;
        sentences.push(&text[start..end]);
        start = boundary.end();
    }
    sentences.push(&text[start..]);
    sentences
}

/// Sentences of `text` whose cleaned tokens intersect `keywords`.
///
/// Order and casing are preserved; each sentence is trimmed and blank
/// sentences are dropped.
#[must_use]
pub fn extract_relevant_sentences(text: &str, keywords: &KeywordSet) -> Vec<String> {
    split_sentences(text)
        .into_iter()
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .filter(|sentence| keywords.intersects(&tokenize_and_clean(sentence)))
        .map(str::to_owned)
        .collect()
}
