//! Domain-scoped relevance crawler.
//!
//! Starting from a seed URL, sitesift renders every reachable same-domain
//! page, keeps the sentences that share a keyword with the caller's
//! instructions, and returns them as [`Document`]s.

pub mod config;
pub mod crawl_engine;
pub mod fetcher;
pub mod keywords;
pub mod parser;
pub mod relevance;
pub mod utils;

use std::sync::Arc;

pub use config::{CrawlConfig, KeywordModelConfig};
pub use crawl_engine::{
    CrawlError, CrawlPlan, CrawlReport, Crawler, Document, FetchError, ParseError,
    ShutdownTrigger,
};
pub use fetcher::{ChromiumFetcher, PageFetcher};
pub use keywords::{
    KeywordExtractionError, KeywordExtractor, OllamaKeywordExtractor, StaticKeywords,
};
pub use parser::{HtmlParser, ScraperParser};
pub use relevance::{KeywordSet, extract_relevant_sentences, is_page_relevant, tokenize_and_clean};

/// Crawl `seed_url` and return the sentences relevant to `instructions`.
///
/// Keywords come from the Ollama endpoint configured through
/// [`KeywordModelConfig::from_env`]; pages are rendered in headless Chromium.
///
/// # Errors
///
/// Fails only when the crawl cannot start: invalid config, bad seed,
/// unreachable keyword model, or no browser. The browser is launched last.
pub async fn crawl(
    seed_url: &str,
    instructions: &str,
    config: CrawlConfig,
) -> Result<Vec<Document>, CrawlError> {
    let extractor = OllamaKeywordExtractor::new(&KeywordModelConfig::from_env())?;
    crawl_with_keywords(seed_url, instructions, config, Arc::new(extractor)).await
}

/// [`crawl`] with a caller-supplied keyword source.
///
/// # Errors
///
/// See [`crawl`].
pub async fn crawl_with_keywords(
    seed_url: &str,
    instructions: &str,
    config: CrawlConfig,
    keywords: Arc<dyn KeywordExtractor>,
) -> Result<Vec<Document>, CrawlError> {
    let plan = CrawlPlan::prepare(&config, seed_url, instructions, keywords.as_ref()).await?;
    let fetcher = ChromiumFetcher::launch(&config).await?;
    let report = Crawler::new(config, Arc::new(fetcher), Arc::new(ScraperParser), keywords)
        .run_plan(plan)
        .await?;
    Ok(report.documents)
}
