//! Single page processing
//!
//! Handles one admitted frontier item end to end:
//! render, parse, gate on depth/relevance, keep relevant sentences, then
//! resolve and gatekeep outbound links and push them one level deeper.

use log::{debug, info};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;

use super::collector::ResultCollector;
use super::crawl_types::{CrawlReport, Document, FrontierItem, PageError, ParseError};
use super::frontier::Frontier;
use super::link_processor::{resolve_link, should_visit};
use super::visited::VisitedSet;
use crate::fetcher::PageFetcher;
use crate::parser::{HtmlParser, Link};
use crate::relevance::{KeywordSet, extract_relevant_sentences, is_page_relevant};

/// Shared state of one crawl.
///
/// Everything here is either immutable or exposes only atomic operations,
/// so workers hold it behind a plain `Arc`.
#[derive(Debug)]
pub struct CrawlContext {
    pub frontier: Frontier,
    pub visited: VisitedSet,
    pub collector: ResultCollector,
    pub keywords: KeywordSet,
    /// Authority (host plus explicit port) every crawled URL must share
    pub base_domain: String,
    pub depth_threshold: u32,
    pub stats: CrawlStats,
}

impl CrawlContext {
    #[must_use]
    pub fn new(
        keywords: KeywordSet,
        base_domain: impl Into<String>,
        max_pages: usize,
        depth_threshold: u32,
    ) -> Self {
        Self {
            frontier: Frontier::new(),
            visited: VisitedSet::new(max_pages),
            collector: ResultCollector::new(),
            keywords,
            base_domain: base_domain.into(),
            depth_threshold,
            stats: CrawlStats::default(),
        }
    }

    /// Consume the context into the final report.
    #[must_use]
    pub fn into_report(self) -> CrawlReport {
        CrawlReport {
            pages_visited: self.visited.len(),
            pages_failed: self.stats.pages_failed.load(Ordering::Relaxed),
            pages_skipped_irrelevant: self.stats.pages_skipped_irrelevant.load(Ordering::Relaxed),
            links_enqueued: self.stats.links_enqueued.load(Ordering::Relaxed),
            documents: self.collector.into_documents(),
        }
    }

    /// Report built from a shared context, for when workers could not all
    /// be reclaimed.
    #[must_use]
    pub fn report_snapshot(&self) -> CrawlReport {
        CrawlReport {
            pages_visited: self.visited.len(),
            pages_failed: self.stats.pages_failed.load(Ordering::Relaxed),
            pages_skipped_irrelevant: self.stats.pages_skipped_irrelevant.load(Ordering::Relaxed),
            links_enqueued: self.stats.links_enqueued.load(Ordering::Relaxed),
            documents: self.collector.snapshot(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CrawlStats {
    pub pages_failed: AtomicUsize,
    pub pages_skipped_irrelevant: AtomicUsize,
    pub links_enqueued: AtomicUsize,
}

/// What happened to an admitted page's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// A document was added to the results
    Kept { sentences: usize },
    /// Past the depth threshold with no keyword overlap
    Irrelevant,
    /// Eligible, but no sentence matched a keyword
    NoMatchingSentences,
}

/// Process one admitted item.
///
/// Links are enqueued whatever the outcome for the page's own content.
/// Errors are returned to the worker, which logs them and moves on.
pub async fn process_page(
    ctx: &CrawlContext,
    fetcher: &dyn PageFetcher,
    parser: &dyn HtmlParser,
    item: &FrontierItem,
) -> Result<PageOutcome, PageError> {
    let page_url = Url::parse(&item.url).map_err(|e| ParseError::Malformed {
        reason: format!("frontier URL {} does not parse: {e}", item.url),
    })?;

    let html = fetcher.render(&item.url).await?;
    let page = parser.parse(&html)?;

    let outcome = if item.depth <= ctx.depth_threshold || is_page_relevant(&page.text, &ctx.keywords) {
        let sentences = extract_relevant_sentences(&page.text, &ctx.keywords);
        if sentences.is_empty() {
            PageOutcome::NoMatchingSentences
        } else {
            let kept = sentences.len();
            ctx.collector.push(Document {
                url: item.url.clone(),
                content: sentences.join(" "),
            });
            PageOutcome::Kept { sentences: kept }
        }
    } else {
        ctx.stats.pages_skipped_irrelevant.fetch_add(1, Ordering::Relaxed);
        PageOutcome::Irrelevant
    };

    match &outcome {
        PageOutcome::Kept { sentences } => info!(
            target: "sitesift::crawl",
            "Processed [depth {}] {} ({sentences} relevant sentences)",
            item.depth, item.url
        ),
        PageOutcome::NoMatchingSentences => info!(
            target: "sitesift::crawl",
            "Processed [depth {}] {} (no relevant sentences)",
            item.depth, item.url
        ),
        PageOutcome::Irrelevant => info!(
            target: "sitesift::crawl",
            "Skipped irrelevant page [depth {}] {}",
            item.depth, item.url
        ),
    }

    let enqueued = enqueue_links(ctx, &page_url, item, &page.links);
    debug!(
        target: "sitesift::links",
        "Found {} links on {}, {} enqueued",
        page.links.len(),
        item.url,
        enqueued
    );

    Ok(outcome)
}

/// Resolve, gatekeep and push `links` as children of `item`.
///
/// Returns the number of items pushed.
pub fn enqueue_links(
    ctx: &CrawlContext,
    page_url: &Url,
    item: &FrontierItem,
    links: &[Link],
) -> usize {
    let mut seen_on_page = HashSet::new();
    let mut pushed = 0;

    for link in links {
        let Some(candidate) = resolve_link(page_url, &link.href) else {
            continue;
        };
        if !should_visit(&candidate, &ctx.base_domain) {
            continue;
        }

        let canonical = String::from(candidate);
        // try_admit stays the authority; this only saves queue churn
        if ctx.visited.contains(&canonical) || !seen_on_page.insert(canonical.clone()) {
            continue;
        }

        ctx.frontier.push(item.child(canonical));
        pushed += 1;
    }

    ctx.stats.links_enqueued.fetch_add(pushed, Ordering::Relaxed);
    pushed
}
