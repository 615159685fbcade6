//! Test utilities shared by the sitesift integration tests

use async_trait::async_trait;
use parking_lot::Mutex;
use sitesift::{
    CrawlConfig, Crawler, FetchError, KeywordExtractor, PageFetcher, ScraperParser,
    StaticKeywords,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory site: a map from URL to HTML, with a log of every render.
#[derive(Default)]
pub struct ScriptedFetcher {
    pages: HashMap<String, String>,
    failures: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    log: Mutex<Vec<String>>,
    shutdowns: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    /// Renders of `url` fail with a navigation error
    pub fn failing(mut self, url: &str, message: &str) -> Self {
        self.failures.insert(url.to_string(), message.to_string());
        self
    }

    /// Renders of `url` take `delay` before answering
    pub fn slow(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    /// Every URL passed to `render`, in call order
    pub fn fetched(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    pub fn shutdowns(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn render(&self, url: &str) -> Result<String, FetchError> {
        self.log.lock().push(url.to_string());

        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(message) = self.failures.get(url) {
            return Err(FetchError::Navigation {
                url: url.to_string(),
                message: message.clone(),
            });
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Navigation {
                url: url.to_string(),
                message: "net::ERR_HTTP_RESPONSE_CODE_FAILURE (404)".to_string(),
            })
    }

    async fn shutdown(&self) {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
    }
}

/// A minimal HTML page with body paragraphs and anchors.
///
/// No `<title>`, so the extracted text is exactly the paragraphs followed by
/// the anchor texts.
#[allow(dead_code)]
pub fn html_page(paragraphs: &[&str], links: &[(&str, &str)]) -> String {
    let body: String = paragraphs.iter().map(|p| format!("<p>{p}</p>")).collect();
    let anchors: String = links
        .iter()
        .map(|(href, text)| format!(r#"<a href="{href}">{text}</a>"#))
        .collect();
    format!("<!DOCTYPE html><html><head></head><body>{body}<nav>{anchors}</nav></body></html>")
}

#[allow(dead_code)]
pub fn config(max_concurrency: usize, max_pages: usize, depth_threshold: u32) -> CrawlConfig {
    CrawlConfig::builder()
        .max_concurrency(max_concurrency)
        .max_pages(max_pages)
        .depth_threshold(depth_threshold)
        .build()
        .expect("test config is valid")
}

#[allow(dead_code)]
pub fn crawler(
    config: CrawlConfig,
    fetcher: Arc<ScriptedFetcher>,
    keywords: Arc<dyn KeywordExtractor>,
) -> Crawler {
    Crawler::new(config, fetcher, Arc::new(ScraperParser), keywords)
}

#[allow(dead_code)]
pub fn keywords(terms: &[&str]) -> Arc<StaticKeywords> {
    Arc::new(StaticKeywords::new(terms.iter().copied()))
}

/// Initialize test logging once; `RUST_LOG=debug cargo test` shows engine logs.
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
