//! Slide deck HTML parser implementation.
//!
//! One forward pass over start-tag, end-tag, and text events with an
//! explicit element stack. Malformed markup never aborts parsing: stray
//! closing tags are ignored and reader-level errors are logged and
//! skipped. The only fatal outcomes are the input-size limits.

use deck_core::{resolve_style, Error, Result, Slide, SlideElement};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

/// Class token marking a top-level slide wrapper element.
pub const SLIDE_CONTAINER_CLASS: &str = "slide-container";

/// Class token marking the free-form body text element of a slide.
pub const CONTENT_CLASS: &str = "content";

/// Literal label delimiting a trailing period value inside body text.
pub const PERIOD_MARKER: &str = "Period:";

/// Tag supplying the slide title.
const TITLE_TAG: &str = "h1";

/// Tag supplying the slide subtitle.
const SUBTITLE_TAG: &str = "h2";

/// Tag whose closing, with an empty element stack, ends the slide.
const SLIDE_END_TAG: &str = "div";

/// Maximum element nesting depth inside a slide.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Maximum number of elements across all slides.
pub const MAX_ELEMENTS: usize = 10_000;

/// Maximum total bytes of captured text.
pub const MAX_CAPTURED_TEXT: usize = 1 << 20;

/// Which structural capture a text accumulator belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureKind {
    Title,
    Subtitle,
    Content,
}

/// An active text capture. `depth` is the element stack depth at which
/// the capture target was opened; when the stack returns to that depth
/// the target is being closed and the capture is finalized.
#[derive(Debug)]
struct Capture {
    kind: CaptureKind,
    depth: usize,
    text: String,
}

impl Capture {
    fn new(kind: CaptureKind, depth: usize) -> Self {
        Self {
            kind,
            depth,
            text: String::new(),
        }
    }
}

/// Parser for slide deck HTML markup.
pub struct SlideHtmlParser {
    slides: Vec<Slide>,
    stack: Vec<SlideElement>,
    captures: Vec<Capture>,
    in_slide: bool,
    element_count: usize,
    captured_bytes: usize,
}

impl SlideHtmlParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            stack: Vec::new(),
            captures: Vec::new(),
            in_slide: false,
            element_count: 0,
            captured_bytes: 0,
        }
    }

    /// Parse HTML content and return the slides in source order.
    ///
    /// A document with zero slide containers yields an empty sequence;
    /// that is a valid parse outcome (the builder rejects it later).
    pub fn parse(mut self, html: &str) -> Result<Vec<Slide>> {
        let mut reader = Reader::from_str(html);
        // HTML is looser than XML; mismatched end tags are our problem,
        // not the reader's.
        reader.check_end_names(false);

        let mut last_error_pos = usize::MAX;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => self.handle_start(e)?,
                Ok(Event::Empty(ref e)) => self.handle_void(e)?,
                Ok(Event::Text(ref e)) => {
                    let text = match e.unescape() {
                        Ok(text) => text.into_owned(),
                        // Unknown entities (&nbsp; and friends) are common
                        // in HTML; keep the raw text rather than drop it.
                        Err(_) => String::from_utf8_lossy(e.as_ref()).into_owned(),
                    };
                    self.handle_text(&text)?;
                }
                Ok(Event::End(ref e)) => self.handle_end(&tag_name(e.name().as_ref())),
                Ok(Event::Eof) => break,
                // Comments, doctype, CDATA, PIs carry no slide content.
                Ok(_) => {}
                Err(e) => {
                    let pos = reader.buffer_position();
                    if pos == last_error_pos {
                        log::warn!("markup error did not advance at byte {}, stopping: {}", pos, e);
                        break;
                    }
                    last_error_pos = pos;
                    log::warn!("markup error at byte {} (continuing): {}", pos, e);
                }
            }
        }

        if self.in_slide {
            self.close_slide();
        }
        Ok(self.slides)
    }

    /// Handle an opening tag.
    fn handle_start(&mut self, e: &BytesStart) -> Result<()> {
        let tag = tag_name(e.name().as_ref());
        let attributes = collect_attributes(e);
        let class_attr = attributes.get("class").cloned().unwrap_or_default();

        if has_class_token(&class_attr, SLIDE_CONTAINER_CLASS) {
            // A container while a slide is open finalizes the prior slide.
            if self.in_slide {
                self.close_slide();
            }
            let style = resolve_style(&class_attr, attributes.get("style").map(String::as_str));
            self.slides.push(Slide::new(style));
            self.in_slide = true;
        }

        if !self.in_slide {
            return Ok(());
        }

        self.check_limits()?;

        let mut element = SlideElement::new(tag.clone(), attributes);
        element.style = resolve_style(
            &class_attr,
            element.attributes.get("style").map(String::as_str),
        );

        if tag == TITLE_TAG {
            self.captures
                .push(Capture::new(CaptureKind::Title, self.stack.len()));
        } else if tag == SUBTITLE_TAG {
            self.captures
                .push(Capture::new(CaptureKind::Subtitle, self.stack.len()));
        } else if has_class_token(&class_attr, CONTENT_CLASS) {
            self.captures
                .push(Capture::new(CaptureKind::Content, self.stack.len()));
        }

        self.stack.push(element);
        Ok(())
    }

    /// Handle a self-closing tag (`<br/>`, `<meta/>`). The element joins
    /// the tree immediately; it cannot capture text.
    fn handle_void(&mut self, e: &BytesStart) -> Result<()> {
        if !self.in_slide {
            return Ok(());
        }
        self.check_limits()?;

        let tag = tag_name(e.name().as_ref());
        let attributes = collect_attributes(e);
        let class_attr = attributes.get("class").cloned().unwrap_or_default();
        let mut element = SlideElement::new(tag, attributes);
        element.style = resolve_style(
            &class_attr,
            element.attributes.get("style").map(String::as_str),
        );
        self.attach(element);
        Ok(())
    }

    /// Handle text data.
    fn handle_text(&mut self, text: &str) -> Result<()> {
        if !self.in_slide {
            return Ok(());
        }

        if let Some(capture) = self.captures.last_mut() {
            self.captured_bytes += text.len();
            if self.captured_bytes > MAX_CAPTURED_TEXT {
                return Err(Error::LimitExceeded(format!(
                    "captured text exceeds {} bytes",
                    MAX_CAPTURED_TEXT
                )));
            }
            // Verbatim: whitespace is preserved until the capture closes.
            capture.text.push_str(text);
        } else {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(());
            }
            if let Some(top) = self.stack.last_mut() {
                top.content.push_str(trimmed);
            }
        }
        Ok(())
    }

    /// Handle a closing tag.
    fn handle_end(&mut self, tag: &str) {
        if !self.in_slide {
            return;
        }

        let matches_top = self
            .stack
            .last()
            .map(|el| el.tag == tag)
            .unwrap_or(false);
        if matches_top {
            self.pop_element();
        } else if !self.stack.is_empty() {
            // Unbalanced markup is tolerated: no pop, no error.
            log::debug!("ignoring mismatched closing tag </{}>", tag);
        }

        if tag == SLIDE_END_TAG && self.stack.is_empty() {
            self.in_slide = false;
        }
    }

    /// Pop the top element, finalize any capture that targeted it, and
    /// attach it to its parent (or the slide, at top level).
    fn pop_element(&mut self) {
        let Some(mut element) = self.stack.pop() else {
            return;
        };

        let targets_popped = self
            .captures
            .last()
            .map(|c| c.depth == self.stack.len())
            .unwrap_or(false);
        if targets_popped {
            if let Some(capture) = self.captures.pop() {
                self.finalize_capture(capture, &mut element);
            }
        }

        self.attach(element);
    }

    /// Store a finished capture into the element and the slide metadata.
    fn finalize_capture(&mut self, capture: Capture, element: &mut SlideElement) {
        let trimmed = capture.text.trim().to_string();
        let Some(slide) = self.slides.last_mut() else {
            return;
        };

        match capture.kind {
            CaptureKind::Title => {
                slide.meta.title = trimmed.clone();
                element.content = trimmed;
            }
            CaptureKind::Subtitle => {
                slide.meta.subtitle = trimmed.clone();
                element.content = trimmed;
            }
            CaptureKind::Content => {
                if let Some((_, rest)) = capture.text.split_once(PERIOD_MARKER) {
                    slide.meta.period = rest.trim().to_string();
                }
                element.content = trimmed;
            }
        }
    }

    /// Attach a finished element to the stack top or the current slide.
    fn attach(&mut self, element: SlideElement) {
        if let Some(parent) = self.stack.last_mut() {
            parent.add_child(element);
        } else if let Some(slide) = self.slides.last_mut() {
            slide.add_element(element);
        }
    }

    /// Finalize the current slide, folding any still-open elements into
    /// their parents so nothing is lost on malformed input.
    fn close_slide(&mut self) {
        while !self.stack.is_empty() {
            self.pop_element();
        }
        self.captures.clear();
        self.in_slide = false;
    }

    /// Enforce the element count and nesting depth bounds.
    fn check_limits(&mut self) -> Result<()> {
        self.element_count += 1;
        if self.element_count > MAX_ELEMENTS {
            return Err(Error::LimitExceeded(format!(
                "more than {} elements",
                MAX_ELEMENTS
            )));
        }
        if self.stack.len() >= MAX_NESTING_DEPTH {
            return Err(Error::LimitExceeded(format!(
                "nesting deeper than {} levels",
                MAX_NESTING_DEPTH
            )));
        }
        Ok(())
    }
}

impl Default for SlideHtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercased tag name from a raw element name.
fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

/// Collect a tag's attributes, lowercasing keys. Malformed attributes
/// are skipped.
fn collect_attributes(e: &BytesStart) -> HashMap<String, String> {
    let mut attributes = HashMap::new();
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
        let value = String::from_utf8_lossy(&attr.value).into_owned();
        attributes.insert(key, value);
    }
    attributes
}

/// True if the whitespace-separated class attribute contains the token.
fn has_class_token(class_attr: &str, token: &str) -> bool {
    class_attr.split_whitespace().any(|t| t == token)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_SLIDE: &str = r#"
<html><body>
<div class="slide-container bg-white">
  <h1 class="text-5xl font-bold">  Quarterly Report  </h1>
  <h2 class="text-3xl text-purple-800">Highlights</h2>
  <div class="content text-xl">Period: 2024 Q1</div>
</div>
</body></html>
"#;

    fn parse(html: &str) -> Vec<Slide> {
        SlideHtmlParser::new().parse(html).unwrap()
    }

    #[test]
    fn test_single_slide_metadata() {
        let slides = parse(ONE_SLIDE);
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].meta.title, "Quarterly Report");
        assert_eq!(slides[0].meta.subtitle, "Highlights");
        assert_eq!(slides[0].meta.period, "2024 Q1");
    }

    #[test]
    fn test_title_matches_element_content() {
        let slides = parse(ONE_SLIDE);
        let h1 = slides[0].find_by_tag("h1").unwrap();
        assert_eq!(h1.content, slides[0].meta.title);
    }

    #[test]
    fn test_container_style_resolved() {
        let slides = parse(ONE_SLIDE);
        assert_eq!(
            slides[0].style.background_color.as_deref(),
            Some("#ffffff")
        );
        let h1 = slides[0].find_by_tag("h1").unwrap();
        assert_eq!(h1.style.font_size.as_deref(), Some("36pt"));
        assert_eq!(h1.style.font_weight.as_deref(), Some("bold"));
    }

    #[test]
    fn test_slide_count_and_order() {
        let html = r#"
<div class="slide-container"><h1>A</h1></div>
<div class="slide-container"><h1>B</h1></div>
<div class="slide-container"><h1>C</h1></div>
"#;
        let slides = parse(html);
        let titles: Vec<&str> = slides.iter().map(|s| s.meta.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_no_containers_yields_empty_sequence() {
        let slides = parse("<html><body><p>plain text</p></body></html>");
        assert!(slides.is_empty());
    }

    #[test]
    fn test_content_without_marker_leaves_period_empty() {
        let html = r#"<div class="slide-container"><div class="content">just text</div></div>"#;
        let slides = parse(html);
        assert_eq!(slides[0].meta.period, "");
        let content = &slides[0].elements[0].children[0];
        assert_eq!(content.content, "just text");
    }

    #[test]
    fn test_mismatched_closing_tag_is_tolerated() {
        let html = r#"<div class="slide-container"><h1>Title</span></h1></div>"#;
        let slides = parse(html);
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].meta.title, "Title");
    }

    #[test]
    fn test_unclosed_elements_fold_into_parents() {
        // The span never closes; the next container still starts cleanly.
        let html = r#"
<div class="slide-container"><h1>First</h1><span>dangling</div>
<div class="slide-container"><h1>Second</h1></div>
"#;
        let slides = parse(html);
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].meta.title, "First");
        assert_eq!(slides[1].meta.title, "Second");
    }

    #[test]
    fn test_text_outside_capture_is_trimmed_onto_stack_top() {
        let html = r#"<div class="slide-container"><p>  padded  </p></div>"#;
        let slides = parse(html);
        let p = slides[0].find_by_tag("p").unwrap();
        assert_eq!(p.content, "padded");
    }

    #[test]
    fn test_capture_preserves_interior_whitespace() {
        let html = "<div class=\"slide-container\"><h1>two  spaces</h1></div>";
        let slides = parse(html);
        assert_eq!(slides[0].meta.title, "two  spaces");
    }

    #[test]
    fn test_nested_element_inside_capture() {
        let html = r#"<div class="slide-container"><h1>Hello <span>World</span></h1></div>"#;
        let slides = parse(html);
        assert_eq!(slides[0].meta.title, "Hello World");
        let h1 = slides[0].find_by_tag("h1").unwrap();
        assert_eq!(h1.children.len(), 1);
        assert_eq!(h1.children[0].tag, "span");
    }

    #[test]
    fn test_element_tree_shape() {
        let slides = parse(ONE_SLIDE);
        // The container itself is the single top-level element.
        assert_eq!(slides[0].elements.len(), 1);
        let container = &slides[0].elements[0];
        assert_eq!(container.tag, "div");
        let tags: Vec<&str> = container.children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["h1", "h2", "div"]);
    }

    #[test]
    fn test_nesting_depth_limit() {
        let mut html = String::from(r#"<div class="slide-container">"#);
        for _ in 0..70 {
            html.push_str("<div>");
        }
        let err = SlideHtmlParser::new().parse(&html).unwrap_err();
        assert!(matches!(err, Error::LimitExceeded(_)));
    }

    #[test]
    fn test_element_count_limit() {
        let mut html = String::from(r#"<div class="slide-container">"#);
        for _ in 0..(MAX_ELEMENTS + 1) {
            html.push_str("<p></p>");
        }
        html.push_str("</div>");
        let err = SlideHtmlParser::new().parse(&html).unwrap_err();
        assert!(matches!(err, Error::LimitExceeded(_)));
    }

    #[test]
    fn test_metadata_scoped_per_slide() {
        let html = r#"
<div class="slide-container"><h1>A</h1><div class="content">Period: 2023</div></div>
<div class="slide-container"><h1>B</h1></div>
"#;
        let slides = parse(html);
        assert_eq!(slides[0].meta.period, "2023");
        assert_eq!(slides[1].meta.period, "");
        assert_eq!(slides[1].meta.title, "B");
    }

    #[test]
    fn test_has_class_token_is_exact() {
        assert!(has_class_token("a slide-container b", "slide-container"));
        assert!(!has_class_token("slide-containerish", "slide-container"));
        assert!(!has_class_token("", "slide-container"));
    }
}
