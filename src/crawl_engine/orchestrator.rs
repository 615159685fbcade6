//! Main crawl orchestration logic
//!
//! Coordinates one crawl:
//! - Seed validation and keyword extraction before a session is needed
//! - A fixed pool of workers sharing one frontier and visited set
//! - Drain detection through the frontier's outstanding-work count
//! - Cancellation and release of the rendering session

use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use url::Url;

use super::crawl_types::{CrawlError, CrawlReport, Document, FrontierItem};
use super::page_processor::{CrawlContext, process_page};
use crate::config::CrawlConfig;
use crate::fetcher::PageFetcher;
use crate::keywords::{KeywordExtractionError, KeywordExtractor};
use crate::parser::HtmlParser;
use crate::relevance::KeywordSet;
use crate::utils::string_utils::safe_truncate_chars;
use crate::utils::url_utils::{authority, canonical_seed, is_valid_url};

/// Handle that stops a running crawl early.
///
/// The crawl returns whatever it collected so far. Triggering is sticky: a
/// crawler that has been told to stop returns immediately from later runs.
#[derive(Debug, Clone)]
pub struct ShutdownTrigger {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    #[must_use]
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Relevance crawler over pluggable fetch, parse and keyword collaborators.
///
/// A crawler drives one crawl per [`Crawler::run`]; the fetcher's session is
/// shut down when the run ends, whether it succeeded or not.
pub struct Crawler {
    config: CrawlConfig,
    fetcher: Arc<dyn PageFetcher>,
    parser: Arc<dyn HtmlParser>,
    keywords: Arc<dyn KeywordExtractor>,
    shutdown: Arc<watch::Sender<bool>>,
}

impl Crawler {
    #[must_use]
    pub fn new(
        config: CrawlConfig,
        fetcher: Arc<dyn PageFetcher>,
        parser: Arc<dyn HtmlParser>,
        keywords: Arc<dyn KeywordExtractor>,
    ) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            config,
            fetcher,
            parser,
            keywords,
            shutdown: Arc::new(shutdown),
        }
    }

    #[must_use]
    pub fn shutdown_trigger(&self) -> ShutdownTrigger {
        ShutdownTrigger {
            tx: Arc::clone(&self.shutdown),
        }
    }

    /// Crawl from `seed_url` and return the relevant documents.
    ///
    /// Document order is completion order and carries no meaning.
    ///
    /// # Errors
    ///
    /// Only startup failures are returned: an invalid config, an unusable
    /// seed or failed keyword extraction. Per-page failures are logged and
    /// skipped.
    pub async fn run(
        &self,
        seed_url: &str,
        instructions: &str,
    ) -> Result<Vec<Document>, CrawlError> {
        Ok(self.run_with_report(seed_url, instructions).await?.documents)
    }

    /// Like [`Crawler::run`], with counters describing the crawl.
    ///
    /// # Errors
    ///
    /// See [`Crawler::run`].
    pub async fn run_with_report(
        &self,
        seed_url: &str,
        instructions: &str,
    ) -> Result<CrawlReport, CrawlError> {
        let result = match CrawlPlan::prepare(
            &self.config,
            seed_url,
            instructions,
            self.keywords.as_ref(),
        )
        .await
        {
            Ok(plan) => self.crawl(plan).await,
            Err(e) => Err(e),
        };
        self.fetcher.shutdown().await;
        result
    }

    /// Crawl a plan prepared ahead of time, without asking for keywords again.
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::Config` if this crawler's config is invalid.
    pub async fn run_plan(&self, plan: CrawlPlan) -> Result<CrawlReport, CrawlError> {
        let result = match self.config.validate() {
            Ok(()) => self.crawl(plan).await,
            Err(e) => Err(e),
        };
        self.fetcher.shutdown().await;
        result
    }

    async fn crawl(&self, plan: CrawlPlan) -> Result<CrawlReport, CrawlError> {
        let CrawlPlan {
            seed,
            base_domain,
            keywords,
        } = plan;

        let ctx = Arc::new(CrawlContext::new(
            keywords,
            base_domain,
            self.config.max_pages(),
            self.config.depth_threshold(),
        ));
        ctx.frontier.push(FrontierItem::new(seed.as_str(), 0));

        info!(
            target: "sitesift::crawl",
            "Starting crawl of {} with {} workers (max {} pages, depth threshold {})",
            seed,
            self.config.max_concurrency(),
            self.config.max_pages(),
            self.config.depth_threshold()
        );

        let (cancel_tx, cancel_rx) = watch::channel(false);
        let workers: Vec<JoinHandle<()>> = (0..self.config.max_concurrency())
            .map(|id| {
                tokio::spawn(worker_loop(
                    id,
                    Arc::clone(&ctx),
                    Arc::clone(&self.fetcher),
                    Arc::clone(&self.parser),
                    cancel_rx.clone(),
                ))
            })
            .collect();
        drop(cancel_rx);

        let mut stop_rx = self.shutdown.subscribe();
        tokio::select! {
            () = ctx.frontier.wait_until_drained() => {
                info!(target: "sitesift::crawl", "Frontier drained");
            }
            () = stop_requested(&mut stop_rx) => {
                warn!(
                    target: "sitesift::crawl",
                    "Shutdown requested with {} items outstanding",
                    ctx.frontier.outstanding()
                );
            }
        }

        // In-flight renders are abandoned, not awaited
        cancel_tx.send_replace(true);
        for worker in &workers {
            worker.abort();
        }
        for worker in workers {
            if let Err(e) = worker.await
                && !e.is_cancelled()
            {
                error!(target: "sitesift::crawl", "Worker task panicked: {e}");
            }
        }

        let report = match Arc::try_unwrap(ctx) {
            Ok(ctx) => ctx.into_report(),
            Err(shared) => shared.report_snapshot(),
        };
        info!(
            target: "sitesift::crawl",
            "Crawl finished: {} pages visited, {} documents, {} failed",
            report.pages_visited,
            report.documents.len(),
            report.pages_failed
        );
        Ok(report)
    }
}

/// A validated seed and the keywords to filter by.
///
/// Everything a crawl needs that doesn't involve the rendering session, so
/// callers can fail fast before paying for a browser launch.
#[derive(Debug, Clone)]
pub struct CrawlPlan {
    seed: Url,
    base_domain: String,
    keywords: KeywordSet,
}

impl CrawlPlan {
    /// Validate `config` and the seed, then ask `extractor` for keywords once.
    ///
    /// # Errors
    ///
    /// `CrawlError::Config` for an invalid config, `CrawlError::InvalidSeed`
    /// for a seed that is not an http(s) URL with a host, and
    /// `CrawlError::KeywordExtraction` when no usable keyword comes back.
    pub async fn prepare(
        config: &CrawlConfig,
        seed_url: &str,
        instructions: &str,
        extractor: &dyn KeywordExtractor,
    ) -> Result<Self, CrawlError> {
        config.validate()?;

        let seed = canonical_seed(seed_url).map_err(|e| CrawlError::InvalidSeed {
            url: seed_url.to_string(),
            reason: e.to_string(),
        })?;
        if !is_valid_url(seed.as_str()) {
            return Err(CrawlError::InvalidSeed {
                url: seed_url.to_string(),
                reason: "only http and https URLs can be crawled".to_string(),
            });
        }
        let base_domain = authority(&seed).ok_or_else(|| CrawlError::InvalidSeed {
            url: seed_url.to_string(),
            reason: "URL has no host".to_string(),
        })?;

        let keywords = extract_keywords(extractor, instructions).await?;
        Ok(Self {
            seed,
            base_domain,
            keywords,
        })
    }

    #[must_use]
    pub fn seed(&self) -> &Url {
        &self.seed
    }
}

async fn extract_keywords(
    extractor: &dyn KeywordExtractor,
    instructions: &str,
) -> Result<KeywordSet, CrawlError> {
    debug!(
        target: "sitesift::keywords",
        "Extracting keywords from instructions: {}",
        safe_truncate_chars(instructions, 200)
    );
    let terms = extractor.extract_keywords(instructions).await?;
    let keywords = KeywordSet::from_terms(&terms);
    if keywords.is_empty() {
        return Err(KeywordExtractionError::Empty.into());
    }
    info!(target: "sitesift::keywords", "Keywords: {}", keywords.sorted().join(", "));
    Ok(keywords)
}

async fn stop_requested(rx: &mut watch::Receiver<bool>) {
    // The sender lives as long as the crawler, so an error can't happen here
    let _ = rx.wait_for(|stop| *stop).await;
}

async fn worker_loop(
    id: usize,
    ctx: Arc<CrawlContext>,
    fetcher: Arc<dyn PageFetcher>,
    parser: Arc<dyn HtmlParser>,
    mut cancel: watch::Receiver<bool>,
) {
    debug!(target: "sitesift::crawl", "Worker {id} started");
    loop {
        if *cancel.borrow() {
            break;
        }

        let lease = tokio::select! {
            lease = ctx.frontier.pop() => lease,
            _ = cancel.changed() => break,
        };

        if !ctx.visited.try_admit(&lease.url) {
            debug!(
                target: "sitesift::crawl",
                "Not admitted (already visited or page budget spent): {}",
                lease.url
            );
            continue;
        }

        if let Err(e) = process_page(&ctx, fetcher.as_ref(), parser.as_ref(), lease.item()).await {
            ctx.stats
                .pages_failed
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            error!(target: "sitesift::crawl", "Failed to process {}: {e}", lease.url);
        }
        // lease drops here, acknowledging the item after its children were pushed
    }
    debug!(target: "sitesift::crawl", "Worker {id} stopped");
}
