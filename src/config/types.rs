//! Core configuration types for a crawl
//!
//! `CrawlConfig` bounds the crawl itself and the rendering session;
//! `KeywordModelConfig` points the keyword extractor at a language model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::constants::{
    DEFAULT_DEPTH_THRESHOLD, DEFAULT_KEYWORD_MODEL, DEFAULT_KEYWORD_TIMEOUT_SECS,
    DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_PAGES, DEFAULT_NAVIGATION_TIMEOUT_SECS,
    DEFAULT_OLLAMA_URL, DEFAULT_PAGE_LOAD_TIMEOUT_SECS,
};

/// Environment variable overriding [`KeywordModelConfig::base_url`]
pub const OLLAMA_URL_ENV: &str = "SITESIFT_OLLAMA_URL";

/// Environment variable overriding [`KeywordModelConfig::model`]
pub const OLLAMA_MODEL_ENV: &str = "SITESIFT_OLLAMA_MODEL";

/// Limits and session settings for one crawl. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Number of concurrent workers, at least 1
    pub(crate) max_concurrency: usize,

    /// Upper bound on pages admitted into the visited set, at least 1
    pub(crate) max_pages: usize,

    /// Pages at depth up to this value skip the whole-page keyword check
    pub(crate) depth_threshold: u32,

    /// Timeout in seconds for `page.goto()`
    ///
    /// Prevents hangs on slow DNS, unresponsive servers, or streaming content.
    pub(crate) page_load_timeout_secs: u64,

    /// Timeout in seconds for `page.wait_for_navigation()`
    pub(crate) navigation_timeout_secs: u64,

    pub(crate) headless: bool,

    /// Chrome user data directory for browser profile isolation
    ///
    /// When unset, each session gets a fresh directory under the system temp
    /// dir, removed again on shutdown.
    #[serde(skip)]
    pub(crate) chrome_data_dir: Option<PathBuf>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            max_pages: DEFAULT_MAX_PAGES,
            depth_threshold: DEFAULT_DEPTH_THRESHOLD,
            page_load_timeout_secs: DEFAULT_PAGE_LOAD_TIMEOUT_SECS,
            navigation_timeout_secs: DEFAULT_NAVIGATION_TIMEOUT_SECS,
            headless: true,
            chrome_data_dir: None,
        }
    }
}

impl CrawlConfig {
    /// Set Chrome user data directory for browser profile isolation
    ///
    /// # Example
    /// ```rust
    /// # use sitesift::config::CrawlConfig;
    /// # fn main() -> Result<(), sitesift::CrawlError> {
    /// let chrome_dir = std::env::temp_dir().join("sitesift_profile");
    /// let config = CrawlConfig::builder()
    ///     .max_pages(20)
    ///     .build()?
    ///     .with_chrome_data_dir(chrome_dir.clone());
    /// assert_eq!(config.chrome_data_dir(), Some(&chrome_dir));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn with_chrome_data_dir(mut self, dir: PathBuf) -> Self {
        self.chrome_data_dir = Some(dir);
        self
    }
}

/// Where and how keywords are generated from the user's instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordModelConfig {
    pub(crate) base_url: String,
    pub(crate) model: String,
    /// Sampling temperature; 0 keeps keyword sets reproducible
    pub(crate) temperature: f32,
    pub(crate) request_timeout_secs: u64,
}

impl Default for KeywordModelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_KEYWORD_MODEL.to_string(),
            temperature: 0.0,
            request_timeout_secs: DEFAULT_KEYWORD_TIMEOUT_SECS,
        }
    }
}

impl KeywordModelConfig {
    /// Defaults, overridden by `SITESIFT_OLLAMA_URL` / `SITESIFT_OLLAMA_MODEL`
    /// when set to a non-blank value.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = non_blank_env(OLLAMA_URL_ENV) {
            config.base_url = url;
        }
        if let Some(model) = non_blank_env(OLLAMA_MODEL_ENV) {
            config.model = model;
        }
        config
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    #[must_use]
    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
