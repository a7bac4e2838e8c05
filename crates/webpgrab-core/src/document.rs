//! HTML query interface and its `scraper` backend.
//!
//! The pipeline only needs "first element by tag", "all elements by tag",
//! "text content" and "attribute value". Those live behind [`DocumentQuery`]
//! and [`ElementView`] so another HTML backend can be swapped in.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Rendered markup that could not be turned into a document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("document is empty")]
    Empty,
}

/// Read-only view of one element.
pub trait ElementView {
    /// Concatenated text of all descendant text nodes.
    fn text_content(&self) -> String;
    /// Attribute value, `None` when absent.
    fn attribute(&self, name: &str) -> Option<&str>;
}

/// Tag-based lookups over a parsed document.
pub trait DocumentQuery {
    type Element<'a>: ElementView
    where
        Self: 'a;

    /// First element with tag `tag` in document order.
    fn find_first(&self, tag: &str) -> Option<Self::Element<'_>>;
    /// All elements with tag `tag` in document order.
    fn find_all(&self, tag: &str) -> Vec<Self::Element<'_>>;
}

/// Document parsed with html5ever via `scraper`.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parses a full HTML document.
    ///
    /// html5ever recovers from any malformed input, so the only rejection is
    /// markup with no content at all.
    pub fn parse(markup: &str) -> Result<Self, ParseError> {
        if markup.trim().is_empty() {
            return Err(ParseError::Empty);
        }
        let html = Html::parse_document(markup);
        for error in html.errors.iter().take(5) {
            tracing::trace!("html parse recovered: {}", error);
        }
        Ok(Self { html })
    }

    fn selector(tag: &str) -> Option<Selector> {
        match Selector::parse(tag) {
            Ok(s) => Some(s),
            Err(e) => {
                tracing::debug!(tag, "invalid tag selector: {:?}", e);
                None
            }
        }
    }
}

impl DocumentQuery for HtmlDocument {
    type Element<'a> = ElementRef<'a>
    where
        Self: 'a;

    fn find_first(&self, tag: &str) -> Option<ElementRef<'_>> {
        let selector = Self::selector(tag)?;
        // Bound first: the `Select` iterator borrows `selector`.
        let first = self.html.select(&selector).next();
        first
    }

    fn find_all(&self, tag: &str) -> Vec<ElementRef<'_>> {
        match Self::selector(tag) {
            Some(selector) => self.html.select(&selector).collect(),
            None => Vec::new(),
        }
    }
}

impl ElementView for ElementRef<'_> {
    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }
}
