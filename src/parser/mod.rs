//! HTML to text and links
//!
//! The engine only needs two things from a rendered page: its visible text
//! and its outbound anchors. [`HtmlParser`] is that seam; [`ScraperParser`]
//! is the implementation used in production.

use ego_tree::NodeRef;
use scraper::{Html, Node, Selector};
use std::sync::LazyLock;

use crate::crawl_engine::crawl_types::ParseError;
use crate::utils::string_utils::collapse_whitespace;

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a[href]").expect("BUG: hardcoded CSS selector 'a[href]' is invalid")
});

/// Elements whose text never reaches the reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// An anchor found in a page, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub text: String,
}

/// Text and links of one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    pub text: String,
    pub links: Vec<Link>,
}

pub trait HtmlParser: Send + Sync {
    /// Visible text, whitespace-normalized, one space between text nodes.
    fn extract_text(&self, raw_html: &str) -> Result<String, ParseError>;

    /// Every anchor with an `href`, in document order.
    fn extract_links(&self, raw_html: &str) -> Result<Vec<Link>, ParseError>;

    /// Both at once. Implementations that build a DOM should override this
    /// to parse only once.
    fn parse(&self, raw_html: &str) -> Result<ParsedPage, ParseError> {
        Ok(ParsedPage {
            text: self.extract_text(raw_html)?,
            links: self.extract_links(raw_html)?,
        })
    }
}

/// `scraper`-backed parser
#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperParser;

impl ScraperParser {
    fn document(raw_html: &str) -> Result<Html, ParseError> {
        if raw_html.trim().is_empty() {
            return Err(ParseError::Malformed {
                reason: "empty document".to_string(),
            });
        }
        Ok(Html::parse_document(raw_html))
    }

    fn text_of(document: &Html) -> String {
        let mut pieces: Vec<&str> = Vec::new();
        for node in document.tree.root().descendants() {
            if let Node::Text(text) = node.value() {
                let trimmed = text.trim();
                if !trimmed.is_empty() && !is_hidden(node) {
                    pieces.push(trimmed);
                }
            }
        }
        collapse_whitespace(&pieces.join(" "))
    }

    fn links_of(document: &Html) -> Vec<Link> {
        document
            .select(&ANCHOR_SELECTOR)
            .filter_map(|anchor| {
                let href = anchor.value().attr("href")?;
                let text: String = anchor.text().collect::<Vec<_>>().join(" ");
                Some(Link {
                    href: href.trim().to_string(),
                    text: collapse_whitespace(&text),
                })
            })
            .collect()
    }
}

fn is_hidden(node: NodeRef<'_, Node>) -> bool {
    node.ancestors().any(|ancestor| {
        ancestor
            .value()
            .as_element()
            .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
    })
}

impl HtmlParser for ScraperParser {
    fn extract_text(&self, raw_html: &str) -> Result<String, ParseError> {
        Ok(Self::text_of(&Self::document(raw_html)?))
    }

    fn extract_links(&self, raw_html: &str) -> Result<Vec<Link>, ParseError> {
        Ok(Self::links_of(&Self::document(raw_html)?))
    }

    fn parse(&self, raw_html: &str) -> Result<ParsedPage, ParseError> {
        let document = Self::document(raw_html)?;
        Ok(ParsedPage {
            text: Self::text_of(&document),
            links: Self::links_of(&document),
        })
    }
}
