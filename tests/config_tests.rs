//! Tests for the crawl configuration builder

use sitesift::CrawlError;
use sitesift::config::{CrawlConfig, KeywordModelConfig};
use tempfile::TempDir;

#[test]
fn builder_defaults_match_documented_values() {
    let config = CrawlConfig::builder().build().unwrap();

    assert_eq!(config.max_concurrency(), 5);
    assert_eq!(config.max_pages(), 100);
    assert_eq!(config.depth_threshold(), 1);
    assert_eq!(config.page_load_timeout_secs(), 30);
    assert_eq!(config.navigation_timeout_secs(), 30);
    assert!(config.headless());
    assert_eq!(config.chrome_data_dir(), None);
    assert_eq!(config, CrawlConfig::default());
}

#[test]
fn builder_applies_every_setter() {
    let temp_dir = TempDir::new().unwrap();
    let config = CrawlConfig::builder()
        .max_concurrency(12)
        .max_pages(3)
        .depth_threshold(0)
        .page_load_timeout_secs(5)
        .navigation_timeout_secs(7)
        .headless(false)
        .chrome_data_dir(temp_dir.path())
        .build()
        .unwrap();

    assert_eq!(config.max_concurrency(), 12);
    assert_eq!(config.max_pages(), 3);
    assert_eq!(config.depth_threshold(), 0);
    assert_eq!(config.page_load_timeout_secs(), 5);
    assert_eq!(config.navigation_timeout_secs(), 7);
    assert!(!config.headless());
    assert_eq!(config.chrome_data_dir(), Some(&temp_dir.path().to_path_buf()));
}

#[test]
fn zero_limits_are_rejected() {
    let cases = [
        CrawlConfig::builder().max_concurrency(0),
        CrawlConfig::builder().max_pages(0),
        CrawlConfig::builder().page_load_timeout_secs(0),
        CrawlConfig::builder().navigation_timeout_secs(0),
        CrawlConfig::builder().chrome_data_dir(""),
    ];

    for builder in cases {
        let err = builder.build().unwrap_err();
        assert!(matches!(err, CrawlError::Config(_)), "got {err}");
    }
}

#[test]
fn chrome_data_dir_is_not_serialized() {
    let temp_dir = TempDir::new().unwrap();
    let config = CrawlConfig::default().with_chrome_data_dir(temp_dir.path().to_path_buf());

    let json = serde_json::to_value(&config).unwrap();
    assert!(json.get("chrome_data_dir").is_none());
    assert_eq!(json["max_pages"], 100);

    let restored: CrawlConfig = serde_json::from_value(json).unwrap();
    assert_eq!(restored.chrome_data_dir(), None);
}

#[test]
fn keyword_model_setters() {
    let config = KeywordModelConfig::default()
        .with_base_url("http://gpu-box:11434")
        .with_model("mistral")
        .with_temperature(0.2)
        .with_request_timeout_secs(10);

    assert_eq!(config.base_url(), "http://gpu-box:11434");
    assert_eq!(config.model(), "mistral");
    assert!((config.temperature() - 0.2).abs() < f32::EPSILON);
    assert_eq!(config.request_timeout_secs(), 10);
}

#[test]
fn validate_catches_configs_that_skipped_the_builder() {
    let json = serde_json::json!({
        "max_concurrency": 4,
        "max_pages": 0,
        "depth_threshold": 1,
        "page_load_timeout_secs": 30,
        "navigation_timeout_secs": 30,
        "headless": true
    });
    let config: CrawlConfig = serde_json::from_value(json).unwrap();

    let err = config.validate().unwrap_err();
    assert!(matches!(err, CrawlError::Config(_)), "got {err}");
    assert!(CrawlConfig::default().validate().is_ok());
}
