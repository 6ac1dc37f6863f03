//! HTML page backed by `scraper`
//!
//! The document is kept as source text. A batch of rewrites parses the
//! source once, resolves every target to its node before touching the tree,
//! swaps in the new children, and keeps the serialized result, so later
//! queries see earlier rewrites.

use crate::page::{ContentRewrite, Page, PageElement, PageError};
use scraper::{Html, Selector};

/// An HTML page loaded from `location`
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    location: String,
    source: String,
}

impl HtmlDocument {
    /// Wraps fetched HTML
    ///
    /// # Example
    ///
    /// ```
    /// use site_lingo::page::{HtmlDocument, Page};
    ///
    /// let html = r#"<p class="t" id="hello">Hello</p>"#;
    /// let page = HtmlDocument::new("https://example.com/", html);
    /// let elements = page.select(".t").unwrap();
    /// assert_eq!(elements[0].id, "hello");
    /// assert_eq!(elements[0].inner_html, "Hello");
    /// ```
    pub fn new(location: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            source: html.into(),
        }
    }

    /// Current HTML, including any rewrites
    pub fn html(&self) -> &str {
        &self.source
    }
}

impl Page for HtmlDocument {
    fn location(&self) -> &str {
        &self.location
    }

    fn select(&self, selector: &str) -> Result<Vec<PageElement>, PageError> {
        let selector = parse_selector(selector)?;
        let document = Html::parse_document(&self.source);

        let elements = document
            .select(&selector)
            .map(|element| {
                PageElement::new(
                    element.value().id().unwrap_or_default(),
                    element.inner_html(),
                )
            })
            .collect();

        Ok(elements)
    }

    fn replace_contents(
        &mut self,
        selector_str: &str,
        rewrites: &[ContentRewrite],
    ) -> Result<(), PageError> {
        if rewrites.is_empty() {
            return Ok(());
        }

        let selector = parse_selector(selector_str)?;
        let mut document = Html::parse_document(&self.source);

        let matched: Vec<_> = document.select(&selector).map(|e| e.id()).collect();
        let targets = rewrites
            .iter()
            .map(|rewrite| {
                matched
                    .get(rewrite.index)
                    .map(|&node| (node, rewrite.html.as_str()))
                    .ok_or_else(|| PageError::NoSuchElement {
                        selector: selector_str.to_string(),
                        index: rewrite.index,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (target, html) in targets {
            let stale: Vec<_> = document
                .tree
                .get(target)
                .map(|node| node.children().map(|child| child.id()).collect())
                .unwrap_or_default();
            for child in stale {
                if let Some(mut node) = document.tree.get_mut(child) {
                    node.detach();
                }
            }

            // Fragment content sits under its synthetic <html> root
            let fragment = Html::parse_fragment(html);
            let mut pending = vec![(*fragment.root_element(), target)];
            while let Some((source, parent)) = pending.pop() {
                for child in source.children() {
                    let Some(mut node) = document.tree.get_mut(parent) else {
                        continue;
                    };
                    let copied = node.append(child.value().clone()).id();
                    pending.push((child, copied));
                }
            }
        }

        self.source = document.html();
        tracing::trace!(
            "Rewrote {} elements matching '{}' on {}",
            rewrites.len(),
            selector_str,
            self.location
        );
        Ok(())
    }
}

fn parse_selector(selector: &str) -> Result<Selector, PageError> {
    Selector::parse(selector).map_err(|e| PageError::Selector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}
