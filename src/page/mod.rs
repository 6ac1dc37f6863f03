//! Page access for collecting and applying translations
//!
//! The collector and the applier never touch HTML directly. They see a page
//! through the [`Page`] trait: the page's location, an ordered list of the
//! elements matching a selector, and the ability to replace the inner HTML of
//! some of those elements in one pass.

mod document;

pub use document::HtmlDocument;

use thiserror::Error;

/// Errors raised while querying or rewriting a page
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("No element #{index} matches '{selector}'")]
    NoSuchElement { selector: String, index: usize },
}

/// A selected element as seen at query time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageElement {
    /// The `id` attribute, empty when absent
    pub id: String,

    pub inner_html: String,
}

impl PageElement {
    pub fn new(id: impl Into<String>, inner_html: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            inner_html: inner_html.into(),
        }
    }
}

/// New inner HTML for the `index`-th element of a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRewrite {
    pub index: usize,
    pub html: String,
}

impl ContentRewrite {
    pub fn new(index: usize, html: impl Into<String>) -> Self {
        Self {
            index,
            html: html.into(),
        }
    }
}

/// A loaded page
pub trait Page {
    /// Full URL of the page
    fn location(&self) -> &str;

    /// Elements matching `selector`, in document order
    fn select(&self, selector: &str) -> Result<Vec<PageElement>, PageError>;

    /// Replaces the content of several elements matching `selector`
    ///
    /// Every index refers to the selection as it was before any of the
    /// rewrites, so replacing an element's content never shifts which
    /// element a later rewrite lands on. Nothing is written when an index is
    /// out of range.
    fn replace_contents(
        &mut self,
        selector: &str,
        rewrites: &[ContentRewrite],
    ) -> Result<(), PageError>;
}
