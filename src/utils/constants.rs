//! Shared configuration constants for sitesift
//!
//! Default values and fixed word/path lists used throughout the crawler,
//! kept in one place to avoid magic numbers.

/// Default number of concurrent crawl workers
pub const DEFAULT_MAX_CONCURRENCY: usize = 5;

/// Default page budget for a single crawl
pub const DEFAULT_MAX_PAGES: usize = 100;

/// Default depth up to which page content is extracted unconditionally
///
/// Depth 0 is the seed, depth 1 its direct links. Both are usually
/// navigational hubs worth keeping regardless of keyword overlap.
pub const DEFAULT_DEPTH_THRESHOLD: u32 = 1;

/// Timeout for `page.goto()` in seconds
pub const DEFAULT_PAGE_LOAD_TIMEOUT_SECS: u64 = 30;

/// Timeout for `page.wait_for_navigation()` in seconds
pub const DEFAULT_NAVIGATION_TIMEOUT_SECS: u64 = 30;

/// Default Ollama endpoint used for keyword extraction
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default model used for keyword extraction
pub const DEFAULT_KEYWORD_MODEL: &str = "llama3.1:8b";

/// Keyword generation can be slow on CPU-only hosts
pub const DEFAULT_KEYWORD_TIMEOUT_SECS: u64 = 120;

/// Chrome user agent string presented by the rendering session
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Words removed from every token set before keyword comparison
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "is", "in", "it", "of", "to", "a", "an", "for", "on", "with", "as", "by", "at",
    "from", "this", "that", "these", "those", "are", "be", "or", "if", "we", "you", "your", "our",
    "but", "not", "can", "have", "has", "do", "does", "did", "will", "would", "should", "could",
    "may", "might", "about", "which", "what", "when", "where", "who", "how", "why", "all", "any",
    "some", "more", "most", "other", "so", "than",
];

/// Path fragments that never lead to crawlable content
///
/// Matched as case-insensitive substrings of the URL path.
pub const EXCLUDED_PATHS: &[&str] = &["/login", "/signup", "/register", "/cart", "/checkout"];

/// File extensions (without the dot) that are never rendered
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "svg", "webp", "ico", "pdf", "zip", "rar", "gz", "tar", "7z",
    "css", "js",
];
