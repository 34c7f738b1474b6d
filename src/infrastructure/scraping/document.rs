//! Minimal read-only queries over a fetched portal page.
//!
//! The handlers only ever need three lookups: elements by tag name, elements
//! by class name, and indexed child cells. Wrapping `scraper` behind this
//! surface keeps the extraction algorithms testable against in-memory
//! documents.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// A parsed portal page.
pub struct PortalDocument {
    html: Html,
}

impl PortalDocument {
    /// Parse an HTML body. Never fails; malformed input yields whatever tree
    /// the parser recovers.
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// Whether any element in the document carries `class_name`.
    pub fn contains_class(&self, class_name: &str) -> bool {
        self.first_by_class(class_name).is_some()
    }

    /// All elements with the given tag name, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<PortalElement<'_>> {
        match compile(tag) {
            Some(selector) => self.html.select(&selector).map(PortalElement::new).collect(),
            None => Vec::new(),
        }
    }

    /// The first element carrying `class_name`, if any.
    pub fn first_by_class(&self, class_name: &str) -> Option<PortalElement<'_>> {
        let selector = compile(&format!(".{class_name}"))?;
        self.html.select(&selector).next().map(PortalElement::new)
    }
}

/// One element inside a [`PortalDocument`].
#[derive(Clone, Copy)]
pub struct PortalElement<'a> {
    inner: ElementRef<'a>,
}

impl<'a> PortalElement<'a> {
    fn new(inner: ElementRef<'a>) -> Self {
        Self { inner }
    }

    /// Descendant elements with the given tag name, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<PortalElement<'a>> {
        match compile(tag) {
            Some(selector) => self.inner.select(&selector).map(PortalElement::new).collect(),
            None => Vec::new(),
        }
    }

    /// The nth descendant `td`, counting from zero.
    pub fn cell(&self, index: usize) -> Option<PortalElement<'a>> {
        self.elements_by_tag("td").into_iter().nth(index)
    }

    /// Concatenated text content, verbatim: no trimming or reformatting.
    pub fn text(&self) -> String {
        self.inner.text().collect()
    }
}

fn compile(raw: &str) -> Option<Selector> {
    match Selector::parse(raw) {
        Ok(selector) => Some(selector),
        Err(error) => {
            warn!("Failed to compile selector '{}': {}", raw, error);
            None
        }
    }
}
