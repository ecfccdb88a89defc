//! Domain types for representing parsed slide deck content.

use crate::style::StyleDecl;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single element on a slide, as captured from the source markup.
///
/// Elements form an owned tree: children are only ever appended, never
/// relinked, so the structure is acyclic by construction. A node is
/// complete once the parser closes its tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideElement {
    /// Tag name of the source element (lowercased).
    pub tag: String,

    /// Text content captured for this element (trimmed).
    pub content: String,

    /// Raw attributes from the source tag.
    pub attributes: HashMap<String, String>,

    /// Style declaration resolved from class tokens and inline style.
    pub style: StyleDecl,

    /// Child elements in document order.
    pub children: Vec<SlideElement>,
}

impl SlideElement {
    /// Create a new element with the given tag and attributes.
    pub fn new(tag: impl Into<String>, attributes: HashMap<String, String>) -> Self {
        Self {
            tag: tag.into(),
            content: String::new(),
            attributes,
            style: StyleDecl::default(),
            children: Vec::new(),
        }
    }

    /// Append a child element.
    pub fn add_child(&mut self, child: SlideElement) {
        self.children.push(child);
    }

    /// Find the first element with the given tag, depth-first,
    /// including this element itself.
    pub fn find_by_tag(&self, tag: &str) -> Option<&SlideElement> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_tag(tag))
    }
}

/// Per-slide metadata extracted during parsing.
///
/// Values default to empty strings when the source markup does not
/// supply them; missing metadata is never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlideMetadata {
    /// Slide title, from the title-tag element.
    pub title: String,

    /// Slide subtitle, from the subtitle-tag element.
    pub subtitle: String,

    /// Reporting period, from the period marker inside a content element.
    pub period: String,
}

/// A single parsed slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    /// Top-level elements in document order.
    pub elements: Vec<SlideElement>,

    /// Metadata extracted from this slide's own elements.
    pub meta: SlideMetadata,

    /// Style declaration of the slide container itself.
    pub style: StyleDecl,
}

impl Slide {
    /// Create a new empty slide with the container's style.
    pub fn new(style: StyleDecl) -> Self {
        Self {
            elements: Vec::new(),
            meta: SlideMetadata::default(),
            style,
        }
    }

    /// Append a top-level element.
    pub fn add_element(&mut self, element: SlideElement) {
        self.elements.push(element);
    }

    /// Find the first element with the given tag anywhere in this
    /// slide's element tree.
    pub fn find_by_tag(&self, tag: &str) -> Option<&SlideElement> {
        self.elements.iter().find_map(|e| e.find_by_tag(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_tag_nested() {
        let mut root = SlideElement::new("div", HashMap::new());
        let mut inner = SlideElement::new("section", HashMap::new());
        let mut h1 = SlideElement::new("h1", HashMap::new());
        h1.content = "Title".to_string();
        inner.add_child(h1);
        root.add_child(inner);

        let mut slide = Slide::new(StyleDecl::default());
        slide.add_element(root);

        let found = slide.find_by_tag("h1").unwrap();
        assert_eq!(found.content, "Title");
        assert!(slide.find_by_tag("table").is_none());
    }

    #[test]
    fn test_find_by_tag_prefers_document_order() {
        let mut slide = Slide::new(StyleDecl::default());
        let mut first = SlideElement::new("h2", HashMap::new());
        first.content = "first".to_string();
        let mut second = SlideElement::new("h2", HashMap::new());
        second.content = "second".to_string();
        slide.add_element(first);
        slide.add_element(second);

        assert_eq!(slide.find_by_tag("h2").unwrap().content, "first");
    }
}
