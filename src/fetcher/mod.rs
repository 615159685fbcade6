//! Page rendering
//!
//! [`PageFetcher`] is the engine's only view of the network: give it a URL,
//! get rendered HTML back. The session behind it is created once per crawl
//! and torn down by [`PageFetcher::shutdown`] when the crawl ends.

pub mod browser;
pub mod chromium;
pub mod cleanup;
pub mod page_timeout;

use async_trait::async_trait;

use crate::crawl_engine::crawl_types::FetchError;

pub use browser::{download_managed_browser, find_browser_executable, launch_browser};
pub use chromium::ChromiumFetcher;
pub use cleanup::CleanupResult;
pub use page_timeout::with_page_timeout;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Rendered HTML of `url`.
    async fn render(&self, url: &str) -> Result<String, FetchError>;

    /// Release the rendering session. Called once, after all workers stop.
    async fn shutdown(&self) {}
}
