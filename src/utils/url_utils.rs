//! URL helpers shared by the gatekeeper and the engine.

use url::Url;

/// Check if a URL string is an absolute http(s) URL
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    // Skip data URLs, javascript URLs, and other non-http schemes
    if url.starts_with("data:") || url.starts_with("javascript:") || url.starts_with("mailto:") {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// The network location of a URL: host plus explicit port, if any.
///
/// Two URLs belong to the same crawl domain iff their authorities are equal.
/// `https://Example.com:8080/x` yields `example.com:8080`.
#[must_use]
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Parse and canonicalize a seed URL.
///
/// Adds `https://` when no scheme is given and strips the fragment, matching
/// the canonical form produced for discovered links. Other schemes are kept
/// as given so the caller can reject them.
pub fn canonical_seed(input: &str) -> Result<Url, url::ParseError> {
    let trimmed = input.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let mut parsed = Url::parse(&with_scheme)?;
    parsed.set_fragment(None);
    Ok(parsed)
}
