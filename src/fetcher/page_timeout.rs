//! Timeout wrapper for page operations
//!
//! Navigation and load waits can hang forever on long-polling pages or
//! unresponsive servers; every browser call in a render goes through here.

use std::future::Future;
use std::time::Duration;

use crate::crawl_engine::crawl_types::FetchError;

/// Run `operation` with a deadline of `timeout_secs`.
///
/// # Arguments
/// * `operation` - The page operation to run
/// * `timeout_secs` - Timeout duration in seconds
/// * `operation_name` - Human-readable name for error messages
/// * `url` - The URL being rendered, for error messages
///
/// # Returns
/// * `Ok(T)` - Operation completed successfully
/// * `Err(FetchError::Timeout)` - The deadline passed first
/// * `Err(_)` - The operation's own error
pub async fn with_page_timeout<F, T>(
    operation: F,
    timeout_secs: u64,
    operation_name: &str,
    url: &str,
) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    match tokio::time::timeout(Duration::from_secs(timeout_secs), operation).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout {
            url: url.to_string(),
            operation: operation_name.to_string(),
            secs: timeout_secs,
        }),
    }
}
