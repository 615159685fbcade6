//! Link resolution and gatekeeping
//!
//! Discovered hrefs are resolved against the page they were found on,
//! canonicalized, and then filtered by [`should_visit`] before they can reach
//! the frontier.

use log::debug;
use url::Url;

use crate::utils::constants::{EXCLUDED_EXTENSIONS, EXCLUDED_PATHS};
use crate::utils::url_utils::authority;

/// Schemes that never name a fetchable document
const IGNORED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Resolve `href` against `page_url` and return its canonical form.
///
/// The fragment is stripped. Returns `None` for empty or fragment-only hrefs,
/// ignored schemes, unparseable links, and anything that is not http(s)
/// after resolution.
#[must_use]
pub fn resolve_link(page_url: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if IGNORED_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
        return None;
    }

    let mut resolved = match page_url.join(href) {
        Ok(url) => url,
        Err(e) => {
            debug!(target: "sitesift::links", "Unparseable link {href:?} on {page_url}: {e}");
            return None;
        }
    };

    if !matches!(resolved.scheme(), "http" | "https") {
        return None;
    }

    resolved.set_fragment(None);
    Some(resolved)
}

/// Decide whether a canonical URL belongs in the frontier.
///
/// Rules, first match wins:
/// 1. the authority must equal `base_domain`
/// 2. the path must not contain an excluded segment such as `/login`
/// 3. the final path segment must not carry an excluded extension
#[must_use]
pub fn should_visit(candidate: &Url, base_domain: &str) -> bool {
    match authority(candidate) {
        Some(candidate_domain) if candidate_domain.eq_ignore_ascii_case(base_domain) => {}
        _ => return false,
    }

    let path = candidate.path().to_ascii_lowercase();
    if EXCLUDED_PATHS.iter().any(|excluded| path.contains(excluded)) {
        return false;
    }

    !has_excluded_extension(&path)
}

fn has_excluded_extension(lowercase_path: &str) -> bool {
    let last_segment = lowercase_path.rsplit('/').next().unwrap_or_default();
    last_segment
        .rsplit_once('.')
        .is_some_and(|(_, ext)| EXCLUDED_EXTENSIONS.contains(&ext))
}
