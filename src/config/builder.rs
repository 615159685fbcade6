//! Fluent builder for `CrawlConfig`
//!
//! Every field has a default, so a builder is always buildable; `build()`
//! rejects values the engine cannot run with.

use std::path::PathBuf;

use super::types::CrawlConfig;
use crate::crawl_engine::crawl_types::CrawlError;

#[derive(Debug, Clone, Default)]
pub struct CrawlConfigBuilder {
    pub(crate) config: CrawlConfig,
}

impl CrawlConfig {
    /// Create a builder for configuring a `CrawlConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> CrawlConfigBuilder {
        CrawlConfigBuilder::default()
    }

    /// Check the limits the engine needs to make progress.
    ///
    /// Configs that bypass the builder (deserialized ones, for instance) are
    /// checked again when a crawl starts.
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::Config` when `max_concurrency`, `max_pages` or
    /// either timeout is zero, or `chrome_data_dir` is an empty path.
    pub fn validate(&self) -> Result<(), CrawlError> {
        if self.max_concurrency == 0 {
            return Err(CrawlError::Config(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.max_pages == 0 {
            return Err(CrawlError::Config("max_pages must be at least 1".to_string()));
        }
        if self.page_load_timeout_secs == 0 || self.navigation_timeout_secs == 0 {
            return Err(CrawlError::Config(
                "page timeouts must be at least 1 second".to_string(),
            ));
        }
        if let Some(dir) = &self.chrome_data_dir
            && dir.as_os_str().is_empty()
        {
            return Err(CrawlError::Config(
                "chrome_data_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl CrawlConfigBuilder {
    /// Validate and produce the config.
    ///
    /// # Errors
    ///
    /// See [`CrawlConfig::validate`].
    pub fn build(self) -> Result<CrawlConfig, CrawlError> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Set Chrome user data directory for browser profile isolation
    #[must_use]
    pub fn chrome_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.chrome_data_dir = Some(dir.into());
        self
    }
}
