//! sitesift: crawl a site and print the sentences relevant to a request.
//!
//! Documents go to stdout as pretty JSON; logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use sitesift::utils::constants::{
    DEFAULT_DEPTH_THRESHOLD, DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_PAGES,
};
use sitesift::{
    ChromiumFetcher, CrawlConfig, CrawlPlan, Crawler, KeywordExtractor, KeywordModelConfig,
    OllamaKeywordExtractor, ScraperParser,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sitesift",
    about = "Crawl one site and keep only the sentences relevant to your instructions",
    version
)]
struct Cli {
    /// Seed URL; https:// is assumed when no scheme is given
    url: String,

    /// What you are looking for, in plain language
    instructions: String,

    /// Number of pages rendered concurrently
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    max_concurrency: usize,

    /// Maximum number of pages fetched
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: usize,

    /// Pages up to this many links from the seed are kept without a keyword check
    #[arg(long, default_value_t = DEFAULT_DEPTH_THRESHOLD)]
    depth_threshold: u32,

    /// Ollama endpoint used for keyword extraction [env: SITESIFT_OLLAMA_URL]
    #[arg(long)]
    ollama_url: Option<String>,

    /// Model used for keyword extraction [env: SITESIFT_OLLAMA_MODEL]
    #[arg(long)]
    model: Option<String>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Browser internals log through tracing; the log facade is already taken
    // by env_logger, so install the subscriber without its log bridge.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        warn!("Failed to install tracing subscriber: {e}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = CrawlConfig::builder()
        .max_concurrency(cli.max_concurrency)
        .max_pages(cli.max_pages)
        .depth_threshold(cli.depth_threshold)
        .headless(!cli.headed)
        .build()?;

    let mut model = KeywordModelConfig::from_env();
    if let Some(url) = cli.ollama_url {
        model = model.with_base_url(url);
    }
    if let Some(name) = cli.model {
        model = model.with_model(name);
    }
    let extractor: Arc<dyn KeywordExtractor> = Arc::new(OllamaKeywordExtractor::new(&model)?);

    let plan = CrawlPlan::prepare(&config, &cli.url, &cli.instructions, extractor.as_ref())
        .await
        .context("Crawl failed")?;
    info!("Crawling {}", plan.seed());

    let fetcher = ChromiumFetcher::launch(&config)
        .await
        .context("Failed to start browser session")?;

    let crawler = Crawler::new(
        config,
        Arc::new(fetcher),
        Arc::new(ScraperParser),
        extractor,
    );

    let trigger = crawler.shutdown_trigger();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping crawl");
            trigger.trigger();
        }
    });

    let report = crawler.run_plan(plan).await.context("Crawl failed")?;

    println!("{}", serde_json::to_string_pretty(&report.documents)?);
    Ok(())
}
