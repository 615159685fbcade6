//! Configuration module for relevance crawling
//!
//! This module provides the `CrawlConfig` struct and its builder, plus the
//! `KeywordModelConfig` used by the language-model keyword extractor.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::CrawlConfigBuilder;
pub use types::{CrawlConfig, KeywordModelConfig, OLLAMA_MODEL_ENV, OLLAMA_URL_ENV};
