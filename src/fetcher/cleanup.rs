//! Browser session teardown

use chromiumoxide::Browser;
use log::{debug, warn};
use std::path::Path;

/// Result of cleanup operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupResult {
    /// All cleanup operations succeeded
    Success,
    /// Some cleanup operations failed, with error details
    PartialFailure(Vec<String>),
}

impl CleanupResult {
    fn from_errors(errors: Vec<String>) -> Self {
        if errors.is_empty() {
            Self::Success
        } else {
            Self::PartialFailure(errors)
        }
    }
}

/// Close the browser, wait for its process, and remove `profile_dir` if given.
///
/// Every step is attempted even when an earlier one fails.
pub async fn cleanup_browser_and_data(
    mut browser: Browser,
    profile_dir: Option<&Path>,
) -> CleanupResult {
    let mut errors = Vec::new();

    debug!(target: "sitesift::cleanup", "Closing browser");
    if let Err(e) = browser.close().await {
        warn!(target: "sitesift::cleanup", "Failed to close browser: {e}");
        errors.push(format!("Browser close failed: {e}"));
    }

    // Reap the process so it is not reported as leaked on drop
    if let Err(e) = browser.wait().await {
        warn!(target: "sitesift::cleanup", "Failed to wait for browser exit: {e}");
        errors.push(format!("Browser wait failed: {e}"));
    }

    if let Some(dir) = profile_dir {
        errors.extend(remove_profile_dir(dir));
    }

    CleanupResult::from_errors(errors)
}

/// Remove a browser profile directory. A directory that is already gone is
/// not an error.
pub fn remove_profile_dir(dir: &Path) -> Option<String> {
    debug!(target: "sitesift::cleanup", "Removing browser profile {}", dir.display());
    match std::fs::remove_dir_all(dir) {
        Ok(()) => None,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!(target: "sitesift::cleanup", "Failed to remove {}: {e}", dir.display());
            Some(format!("Directory cleanup failed: {e}"))
        }
    }
}
