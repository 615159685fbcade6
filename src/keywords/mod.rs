//! Keyword extraction
//!
//! Turns the caller's natural-language instructions into the terms the
//! relevance filter matches against. The crawl calls the extractor exactly
//! once, before anything is fetched.

pub mod ollama;

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

pub use ollama::{OllamaKeywordExtractor, parse_keyword_response};

/// Failure to derive keywords. Fatal for the crawl.
#[derive(Debug, Error)]
pub enum KeywordExtractionError {
    /// The model endpoint could not be reached or the client not built
    #[error("Keyword service request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The model endpoint answered with a non-success status
    #[error("Keyword service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The model endpoint's body was not the expected JSON
    #[error("Could not decode keyword service response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Nothing usable survived parsing and stop-word removal
    #[error("No usable keywords could be derived from the instructions")]
    Empty,
}

/// Source of keyword terms for a set of instructions.
///
/// Terms may be single words or phrases; the engine runs them through the
/// same tokenization it applies to page text.
#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    async fn extract_keywords(
        &self,
        instructions: &str,
    ) -> Result<Vec<String>, KeywordExtractionError>;
}

/// Fixed keyword list, for callers that already know what they want and for
/// tests.
#[derive(Debug, Default)]
pub struct StaticKeywords {
    terms: Vec<String>,
    calls: AtomicUsize,
}

impl StaticKeywords {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `extract_keywords` has been called
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl KeywordExtractor for StaticKeywords {
    async fn extract_keywords(
        &self,
        _instructions: &str,
    ) -> Result<Vec<String>, KeywordExtractionError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.terms.is_empty() {
            return Err(KeywordExtractionError::Empty);
        }
        Ok(self.terms.clone())
    }
}
