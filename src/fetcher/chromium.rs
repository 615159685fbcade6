//! Headless Chromium page fetcher

use async_trait::async_trait;
use chromiumoxide::{Browser, Page};
use log::{debug, info, warn};
use std::path::PathBuf;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use super::PageFetcher;
use super::browser::launch_browser;
use super::cleanup::{CleanupResult, cleanup_browser_and_data};
use super::page_timeout::with_page_timeout;
use crate::config::CrawlConfig;
use crate::crawl_engine::crawl_types::{CrawlError, FetchError};

/// One browser session shared by every worker of a crawl.
///
/// Each render opens its own tab, so concurrent renders do not interfere.
pub struct ChromiumFetcher {
    browser: RwLock<Option<Browser>>,
    handler: Mutex<Option<JoinHandle<()>>>,
    profile_dir: PathBuf,
    /// Only profiles created for this session are deleted on shutdown
    owns_profile_dir: bool,
    page_load_timeout_secs: u64,
    navigation_timeout_secs: u64,
}

impl ChromiumFetcher {
    /// Launch the browser session for one crawl.
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::Session` when no browser can be found, downloaded
    /// or started.
    pub async fn launch(config: &CrawlConfig) -> Result<Self, CrawlError> {
        let requested_dir = config.chrome_data_dir().cloned();
        let owns_profile_dir = requested_dir.is_none();
        let (browser, handler, profile_dir) =
            launch_browser(config.headless(), requested_dir).await?;

        Ok(Self {
            browser: RwLock::new(Some(browser)),
            handler: Mutex::new(Some(handler)),
            profile_dir,
            owns_profile_dir,
            page_load_timeout_secs: config.page_load_timeout_secs(),
            navigation_timeout_secs: config.navigation_timeout_secs(),
        })
    }

    async fn load(&self, page: &Page, url: &str) -> Result<String, FetchError> {
        with_page_timeout(
            async {
                page.goto(url)
                    .await
                    .map(|_| ())
                    .map_err(|e| navigation_error(url, &e))
            },
            self.page_load_timeout_secs,
            "Page navigation",
            url,
        )
        .await?;

        with_page_timeout(
            async {
                page.wait_for_navigation()
                    .await
                    .map(|_| ())
                    .map_err(|e| navigation_error(url, &e))
            },
            self.navigation_timeout_secs,
            "Page load",
            url,
        )
        .await?;

        page.content().await.map_err(|e| FetchError::Navigation {
            url: url.to_string(),
            message: format!("failed to read rendered HTML: {e}"),
        })
    }
}

fn navigation_error(url: &str, err: &chromiumoxide::error::CdpError) -> FetchError {
    FetchError::Navigation {
        url: url.to_string(),
        message: err.to_string(),
    }
}

#[async_trait]
impl PageFetcher for ChromiumFetcher {
    async fn render(&self, url: &str) -> Result<String, FetchError> {
        let guard = self.browser.read().await;
        let browser = guard
            .as_ref()
            .ok_or_else(|| FetchError::Session("browser session already shut down".to_string()))?;

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| FetchError::Session(format!("failed to open tab: {e}")))?;

        let result = self.load(&page, url).await;

        if let Err(e) = page.close().await {
            debug!(target: "sitesift::browser", "Failed to close tab for {url}: {e}");
        }
        result
    }

    async fn shutdown(&self) {
        let Some(browser) = self.browser.write().await.take() else {
            return;
        };

        let profile_dir = self.owns_profile_dir.then_some(self.profile_dir.as_path());
        match cleanup_browser_and_data(browser, profile_dir).await {
            CleanupResult::Success => {
                debug!(target: "sitesift::cleanup", "Browser and profile cleaned up");
            }
            CleanupResult::PartialFailure(errors) => {
                warn!(target: "sitesift::cleanup", "Cleanup completed with failures: {errors:?}");
            }
        }

        // The handler must outlive browser.close(), which talks CDP through it
        if let Some(handler) = self.handler.lock().await.take() {
            handler.abort();
            if let Err(e) = handler.await
                && !e.is_cancelled()
            {
                warn!(target: "sitesift::cleanup", "Handler task failed during abort: {e}");
            }
        }
        info!(target: "sitesift::browser", "Browser session closed");
    }
}
