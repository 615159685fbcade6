//! UTF-8-safe string helpers
//!
//! Used for log previews of page text and model output, and for normalizing
//! the whitespace of extracted text.

/// Safely truncate a string to a maximum number of CHARACTERS (not bytes).
///
/// Never panics on multi-byte characters; the cut always lands on a char
/// boundary.
///
/// # Examples
/// ```
/// # use sitesift::utils::string_utils::safe_truncate_chars;
/// assert_eq!(safe_truncate_chars("Hello, World!", 5), "Hello");
/// assert_eq!(safe_truncate_chars("Hi", 100), "Hi");
/// ```
#[inline]
pub fn safe_truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}

/// Collapse every run of whitespace into a single ASCII space and trim the ends.
///
/// # Examples
/// ```
/// # use sitesift::utils::string_utils::collapse_whitespace;
/// assert_eq!(collapse_whitespace("  Apply\n\tfor   a grant "), "Apply for a grant");
/// ```
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
