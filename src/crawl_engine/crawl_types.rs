//! Core types for crawl operations.
//!
//! Frontier items, extracted documents, the per-crawl report, and the error
//! taxonomy shared by the engine and its collaborators.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keywords::KeywordExtractionError;

/// A unit of crawl work: a canonical URL and its link distance from the seed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrontierItem {
    pub url: String,
    pub depth: u32,
}

impl FrontierItem {
    #[must_use]
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }

    /// Item for a link discovered on this item's page.
    #[must_use]
    pub fn child(&self, url: impl Into<String>) -> Self {
        Self::new(url, self.depth + 1)
    }
}

/// Relevant text retained from one page.
///
/// `content` is the relevant sentences joined by a single space and is never
/// empty for a document that reaches the results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub url: String,
    pub content: String,
}

/// Documents plus counters describing what the crawl did.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlReport {
    /// Extracted documents in completion order
    pub documents: Vec<Document>,
    /// URLs admitted into the visited set
    pub pages_visited: usize,
    /// Admitted pages whose fetch or parse failed
    pub pages_failed: usize,
    /// Deep pages dropped for lack of keyword overlap
    pub pages_skipped_irrelevant: usize,
    /// Frontier pushes made from discovered links
    pub links_enqueued: usize,
}

/// Failure to obtain rendered HTML for one URL.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Navigation or page creation failed
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// The page did not load in time
    #[error("{operation} for {url} timed out after {secs} seconds")]
    Timeout {
        url: String,
        operation: String,
        secs: u64,
    },

    /// The shared rendering session is unusable
    #[error("Rendering session error: {0}")]
    Session(String),
}

/// Failure to turn raw HTML into text and links.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("Malformed content: {reason}")]
    Malformed { reason: String },
}

/// A per-page failure. Logged at the worker boundary and never propagated.
#[derive(Debug, Clone, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors that abort a whole crawl
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The seed URL cannot be crawled
    #[error("Invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    /// Keywords could not be derived from the instructions
    #[error("Keyword extraction failed: {0}")]
    KeywordExtraction(#[from] KeywordExtractionError),

    /// The rendering session could not be started
    #[error("Browser session error: {0}")]
    Session(String),
}

impl From<anyhow::Error> for CrawlError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the full context chain
        Self::Session(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_is_one_level_deeper() {
        let parent = FrontierItem::new("https://example.com/", 3);
        let child = parent.child("https://example.com/a");
        assert_eq!(child.depth, 4);
        assert_eq!(child.url, "https://example.com/a");
    }

    #[test]
    fn anyhow_errors_become_session_errors_with_context() {
        let err = anyhow::anyhow!("no chrome").context("Failed to launch browser");
        let crawl_err = CrawlError::from(err);
        assert_eq!(
            crawl_err.to_string(),
            "Browser session error: Failed to launch browser: no chrome"
        );
    }

    #[test]
    fn page_error_is_transparent() {
        let err: PageError = FetchError::Timeout {
            url: "https://example.com/".into(),
            operation: "Page navigation".into(),
            secs: 30,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Page navigation for https://example.com/ timed out after 30 seconds"
        );
    }
}
