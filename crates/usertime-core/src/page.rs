//! In-memory page document built from HTML.
//!
//! Only elements that carry an `id` attribute are kept: those are the ones a
//! caller can address. Each keeps its tag name and text content, and the
//! text is what the updater rewrites.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use scraper::{ElementRef, Html};

use crate::error::CoreError;
use crate::system::{Document, Element};

/// An addressable element of a [`Page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageElement {
    tag: String,
    text: String,
}

impl PageElement {
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Element for PageElement {
    fn text_content(&self) -> &str {
        &self.text
    }

    fn set_text_content(&mut self, text: String) {
        self.text = text;
    }
}

/// A page whose `id`-bearing elements can be looked up and rewritten.
#[derive(Debug, Clone, Default)]
pub struct Page {
    elements: HashMap<String, PageElement>,
    /// Ids in document order.
    order: Vec<String>,
}

impl Page {
    /// An empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an HTML document.
    ///
    /// Duplicate ids resolve to the first element in document order, the way
    /// `getElementById` does. Empty ids are not addressable and are skipped.
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let mut page = Self::new();
        for node in document.root_element().descendants() {
            let Some(el) = ElementRef::wrap(node) else {
                continue;
            };
            let Some(id) = el.value().id() else {
                continue;
            };
            if id.is_empty() || page.elements.contains_key(id) {
                continue;
            }
            let text: String = el.text().collect();
            page.push(id.to_string(), el.value().name().to_string(), text);
        }
        page
    }

    /// Read and parse an HTML file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let html = fs::read_to_string(path)?;
        Ok(Self::parse(&html))
    }

    /// Builder form of [`Page::insert`] with empty text.
    pub fn with_element(mut self, id: impl Into<String>, tag: impl Into<String>) -> Self {
        self.insert(id, tag, String::new());
        self
    }

    /// Add an element, replacing any existing element with the same id.
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        tag: impl Into<String>,
        text: impl Into<String>,
    ) {
        let id = id.into();
        if let Some(existing) = self.elements.get_mut(&id) {
            existing.tag = tag.into();
            existing.text = text.into();
        } else {
            self.push(id, tag.into(), text.into());
        }
    }

    fn push(&mut self, id: String, tag: String, text: String) {
        self.order.push(id.clone());
        self.elements.insert(id, PageElement { tag, text });
    }

    /// Current text of the element with this id.
    pub fn text_of(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|el| el.text.as_str())
    }

    pub fn element(&self, id: &str) -> Option<&PageElement> {
        self.elements.get(id)
    }

    /// Addressable ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Document for Page {
    fn get_element_by_id(&mut self, id: &str) -> Option<&mut dyn Element> {
        self.elements.get_mut(id).map(|el| el as &mut dyn Element)
    }
}
