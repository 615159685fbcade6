//! Crawl Engine Module
//!
//! The bounded-concurrency scheduler and the shared state it runs on: the
//! frontier, the visited set, the result collector, link gatekeeping and the
//! per-page pipeline.

// Sub-modules
pub mod collector;
pub mod crawl_types;
pub mod frontier;
pub mod link_processor;
pub mod orchestrator;
pub mod page_processor;
pub mod visited;

// Re-exports for public API
pub use collector::ResultCollector;
pub use crawl_types::{
    CrawlError, CrawlReport, Document, FetchError, FrontierItem, PageError, ParseError,
};
pub use frontier::{Frontier, FrontierLease};
pub use link_processor::{resolve_link, should_visit};
pub use orchestrator::{CrawlPlan, Crawler, ShutdownTrigger};
pub use page_processor::{CrawlContext, PageOutcome, process_page};
pub use visited::VisitedSet;
