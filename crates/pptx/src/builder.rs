//! PPTX package builder.
//!
//! Turns a parsed slide sequence into the full ordered part list and
//! hands it to the selected assembly strategy. Parsing has already
//! finished by the time this runs, so the slide count baked into the
//! presentation part always matches the slide parts emitted.

use crate::package::{
    PackagePart, Relationship, Strategy, REL_APP_PROPS, REL_CORE_PROPS, REL_OFFICE_DOCUMENT,
    REL_SLIDE, REL_SLIDE_LAYOUT, REL_SLIDE_MASTER, REL_THEME,
};
use crate::templates::{self, SlideParams, TextStyle, ACCENT_COLOR};
use deck_core::{Error, Result, Slide, StyleDecl};
use std::path::Path;

/// Creator recorded in the document properties.
pub const DEFAULT_CREATOR: &str = "html2pptx converter";

/// Document title when the first slide has none.
const DEFAULT_DOC_TITLE: &str = "Presentation";

/// Builds a PPTX package from parsed slides.
pub struct PptxBuilder {
    strategy: Strategy,
}

impl PptxBuilder {
    /// Create a builder using the default in-memory assembly strategy.
    pub fn new() -> Self {
        Self {
            strategy: Strategy::default(),
        }
    }

    /// Select the assembly strategy for this builder.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Build the package at `destination`.
    ///
    /// An empty slide sequence is rejected before any destination I/O.
    pub fn build(&self, slides: &[Slide], destination: &Path) -> Result<()> {
        if slides.is_empty() {
            return Err(Error::NoSlides);
        }
        let parts = self.parts(slides);
        log::debug!(
            "assembling {} parts into {}",
            parts.len(),
            destination.display()
        );
        self.strategy.assembler().assemble(&parts, destination)
    }

    /// Produce every package part, content-types manifest first, in the
    /// order the archive will store them.
    pub fn parts(&self, slides: &[Slide]) -> Vec<PackagePart> {
        let count = slides.len();
        let mut parts = Vec::with_capacity(11 + count * 2);

        parts.push(PackagePart::new(
            "[Content_Types].xml",
            templates::content_types(count),
        ));

        let root_rels = [
            Relationship::new("rId1", REL_OFFICE_DOCUMENT, "ppt/presentation.xml"),
            Relationship::new("rId2", REL_CORE_PROPS, "docProps/core.xml"),
            Relationship::new("rId3", REL_APP_PROPS, "docProps/app.xml"),
        ];
        parts.push(PackagePart::new(
            "_rels/.rels",
            templates::relationships(&root_rels),
        ));

        parts.push(PackagePart::new(
            "docProps/core.xml",
            templates::core_properties(&document_title(slides), DEFAULT_CREATOR),
        ));
        parts.push(PackagePart::new(
            "docProps/app.xml",
            templates::app_properties(count),
        ));

        parts.push(PackagePart::new(
            "ppt/presentation.xml",
            templates::presentation(count),
        ));

        let mut pres_rels = vec![Relationship::new(
            "rId1",
            REL_SLIDE_MASTER,
            "slideMasters/slideMaster1.xml",
        )];
        for idx in 0..count {
            pres_rels.push(Relationship::new(
                templates::slide_rel_id(idx),
                REL_SLIDE,
                format!("slides/slide{}.xml", idx + 1),
            ));
        }
        parts.push(PackagePart::new(
            "ppt/_rels/presentation.xml.rels",
            templates::relationships(&pres_rels),
        ));

        parts.push(PackagePart::new("ppt/theme/theme1.xml", templates::theme()));

        parts.push(PackagePart::new(
            "ppt/slideMasters/slideMaster1.xml",
            templates::slide_master(),
        ));
        let master_rels = [
            Relationship::new("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
            Relationship::new("rId2", REL_THEME, "../theme/theme1.xml"),
        ];
        parts.push(PackagePart::new(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            templates::relationships(&master_rels),
        ));

        parts.push(PackagePart::new(
            "ppt/slideLayouts/slideLayout1.xml",
            templates::slide_layout(),
        ));
        let layout_rels = [Relationship::new(
            "rId1",
            REL_SLIDE_MASTER,
            "../slideMasters/slideMaster1.xml",
        )];
        parts.push(PackagePart::new(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            templates::relationships(&layout_rels),
        ));

        let slide_rels = [Relationship::new(
            "rId1",
            REL_SLIDE_LAYOUT,
            "../slideLayouts/slideLayout1.xml",
        )];
        for (idx, slide) in slides.iter().enumerate() {
            let title = slide_title(slide, idx);
            let params = SlideParams {
                title: &title,
                title_style: resolve_text_style(
                    TextStyle::new(3600, true, None),
                    slide.find_by_tag("h1").map(|e| &e.style),
                ),
                subtitle: &slide.meta.subtitle,
                subtitle_style: resolve_text_style(
                    TextStyle::new(2800, true, Some(ACCENT_COLOR)),
                    slide.find_by_tag("h2").map(|e| &e.style),
                ),
                period: &slide.meta.period,
            };
            parts.push(PackagePart::new(
                format!("ppt/slides/slide{}.xml", idx + 1),
                templates::slide(&params),
            ));
            parts.push(PackagePart::new(
                format!("ppt/slides/_rels/slide{}.xml.rels", idx + 1),
                templates::relationships(&slide_rels),
            ));
        }

        parts
    }
}

impl Default for PptxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Document-level title: the first slide's title, or a fixed default.
fn document_title(slides: &[Slide]) -> String {
    slides
        .first()
        .map(|s| s.meta.title.as_str())
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_DOC_TITLE)
        .to_string()
}

/// Per-slide title with fallbacks: metadata, then the first `h1`
/// element's content, then a numbered placeholder.
fn slide_title(slide: &Slide, index: usize) -> String {
    if !slide.meta.title.is_empty() {
        return slide.meta.title.clone();
    }
    if let Some(h1) = slide.find_by_tag("h1") {
        if !h1.content.is_empty() {
            return h1.content.clone();
        }
    }
    format!("Slide {}", index + 1)
}

/// Fold a parsed style declaration into a template text style. Values
/// outside the fixed vocabulary are ignored and the base wins.
fn resolve_text_style(base: TextStyle, style: Option<&StyleDecl>) -> TextStyle {
    let Some(style) = style else {
        return base;
    };
    let mut resolved = base;
    if let Some(size) = style.font_size.as_deref().and_then(templates::size_hundredths) {
        resolved.size = size;
    }
    if let Some(color) = style.color.as_deref().and_then(templates::hex_color) {
        resolved.color = Some(color);
    }
    if let Some(weight) = style.font_weight.as_deref() {
        resolved.bold = weight == "bold";
    }
    resolved
}
