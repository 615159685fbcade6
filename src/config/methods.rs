//! Builder setters
//!
//! Values are checked in `build()`, not here, so setters can be chained in
//! any order.

use super::builder::CrawlConfigBuilder;

impl CrawlConfigBuilder {
    /// Number of workers pulling from the frontier concurrently
    #[must_use]
    pub fn max_concurrency(mut self, workers: usize) -> Self {
        self.config.max_concurrency = workers;
        self
    }

    /// Maximum number of distinct URLs fetched in one crawl
    #[must_use]
    pub fn max_pages(mut self, pages: usize) -> Self {
        self.config.max_pages = pages;
        self
    }

    /// Depth up to which page content is extracted unconditionally
    ///
    /// With the default of 1, the seed and the pages it links to are always
    /// kept; deeper pages need at least one keyword in their text.
    #[must_use]
    pub fn depth_threshold(mut self, depth: u32) -> Self {
        self.config.depth_threshold = depth;
        self
    }

    /// Set timeout for `page.goto()` operations
    ///
    /// # Arguments
    /// * `timeout_secs` - Timeout in seconds (default: 30)
    #[must_use]
    pub fn page_load_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.page_load_timeout_secs = timeout_secs;
        self
    }

    /// Set timeout for `page.wait_for_navigation()` operations
    ///
    /// # Arguments
    /// * `timeout_secs` - Timeout in seconds (default: 30)
    #[must_use]
    pub fn navigation_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.navigation_timeout_secs = timeout_secs;
        self
    }

    /// Set browser headless mode
    ///
    /// Headed mode (`false`) opens a visible window and needs a display
    /// server. Useful for watching a crawl while debugging.
    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }
}
