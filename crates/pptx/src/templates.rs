//! XML templates for every package part.
//!
//! Pure functions from typed parameters to complete part content. All
//! user-supplied text is XML-escaped before embedding; numeric and color
//! parameters are validated against the fixed style vocabulary so no
//! free-form value ever reaches the XML.

use crate::package::Relationship;
use quick_xml::escape::escape;

const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PRESENTATION: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

/// Internal slide identifiers in `sldIdLst` start here.
const SLIDE_ID_BASE: usize = 256;

/// English Metric Units per inch.
const EMU_PER_INCH: f64 = 914_400.0;

/// Slide size, 16:9 (10in x 5.625in).
const SLIDE_CX: i64 = 9_144_000;
const SLIDE_CY: i64 = 5_143_500;

/// Accent color for the subtitle and the decorative bars.
pub const ACCENT_COLOR: &str = "8A2BE2";

/// Muted color for the period line.
pub const PERIOD_COLOR: &str = "666666";

/// Color for the corner logo text.
pub const LOGO_COLOR: &str = "888888";

/// Fixed corner logo text.
pub const LOGO_TEXT: &str = "Deep Research";

/// Resolved run styling for one text box, in template vocabulary:
/// size in hundredths of a point, explicit bold, optional RRGGBB color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    pub size: u32,
    pub bold: bool,
    pub color: Option<String>,
}

impl TextStyle {
    pub fn new(size: u32, bold: bool, color: Option<&str>) -> Self {
        Self {
            size,
            bold,
            color: color.map(str::to_string),
        }
    }
}

/// Typed parameters for one slide part. Empty subtitle or period means
/// the corresponding text box is omitted.
#[derive(Debug, Clone)]
pub struct SlideParams<'a> {
    pub title: &'a str,
    pub title_style: TextStyle,
    pub subtitle: &'a str,
    pub subtitle_style: TextStyle,
    pub period: &'a str,
}

/// Parse a `"36pt"` style value into hundredths of a point. Anything
/// outside the `NNpt` form is rejected.
pub fn size_hundredths(value: &str) -> Option<u32> {
    let digits = value.strip_suffix("pt")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().map(|pt| pt * 100)
}

/// Parse a `"#rrggbb"` style value into an uppercase RRGGBB string.
/// Anything that is not six hex digits is rejected.
pub fn hex_color(value: &str) -> Option<String> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Some(hex.to_ascii_uppercase())
}

fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// `[Content_Types].xml`: defaults for rels/xml plus one override per
/// non-default part, including every slide.
pub fn content_types(slide_count: usize) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str("<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">");
    xml.push_str("<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>");
    xml.push_str("<Default Extension=\"xml\" ContentType=\"application/xml\"/>");
    xml.push_str("<Override PartName=\"/ppt/presentation.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml\"/>");
    xml.push_str("<Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml\"/>");
    xml.push_str("<Override PartName=\"/ppt/slideLayouts/slideLayout1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>");
    xml.push_str("<Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>");
    for num in 1..=slide_count {
        xml.push_str(&format!(
            "<Override PartName=\"/ppt/slides/slide{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>",
            num
        ));
    }
    xml.push_str("<Override PartName=\"/docProps/core.xml\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>");
    xml.push_str("<Override PartName=\"/docProps/app.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.extended-properties+xml\"/>");
    xml.push_str("</Types>");
    xml
}

/// A relationships part from its typed entries.
pub fn relationships(rels: &[Relationship]) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(
        "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    );
    for rel in rels {
        xml.push_str(&format!(
            "<Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"/>",
            rel.id, rel.rel_type, rel.target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// `docProps/core.xml`.
pub fn core_properties(title: &str, creator: &str) -> String {
    format!(
        "{}<cp:coreProperties xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" xmlns:dc=\"http://purl.org/dc/elements/1.1/\" xmlns:dcterms=\"http://purl.org/dc/terms/\" xmlns:dcmitype=\"http://purl.org/dc/dcmitype/\" xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"><dc:title>{}</dc:title><dc:creator>{}</dc:creator><cp:lastModifiedBy>{}</cp:lastModifiedBy><cp:revision>1</cp:revision></cp:coreProperties>",
        XML_DECL,
        escape(title),
        escape(creator),
        escape(creator)
    )
}

/// `docProps/app.xml`.
pub fn app_properties(slide_count: usize) -> String {
    format!(
        "{}<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\" xmlns:vt=\"http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes\"><Application>html2pptx</Application><Slides>{}</Slides><PresentationFormat>On-screen Show (16:9)</PresentationFormat><ScaleCrop>false</ScaleCrop><LinksUpToDate>false</LinksUpToDate><SharedDoc>false</SharedDoc><HyperlinksChanged>false</HyperlinksChanged><AppVersion>1.0000</AppVersion></Properties>",
        XML_DECL, slide_count
    )
}

/// `ppt/presentation.xml`: one slide reference per slide, internal ids
/// counting up from the base, 16:9 slide size.
pub fn presentation(slide_count: usize) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(&format!(
        "<p:presentation xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\">",
        NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
    ));
    xml.push_str("<p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>");
    xml.push_str("<p:sldIdLst>");
    for idx in 0..slide_count {
        xml.push_str(&format!(
            "<p:sldId id=\"{}\" r:id=\"{}\"/>",
            SLIDE_ID_BASE + idx,
            slide_rel_id(idx)
        ));
    }
    xml.push_str("</p:sldIdLst>");
    xml.push_str(&format!(
        "<p:sldSz cx=\"{}\" cy=\"{}\"/><p:notesSz cx=\"6858000\" cy=\"9144000\"/>",
        SLIDE_CX, SLIDE_CY
    ));
    xml.push_str("</p:presentation>");
    xml
}

/// Relationship id used for a slide inside the presentation part.
/// rId1 is the slide master; slides follow.
pub fn slide_rel_id(slide_index: usize) -> String {
    format!("rId{}", slide_index + 2)
}

/// `ppt/theme/theme1.xml`: one shared theme for the whole deck.
pub fn theme() -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(&format!("<a:theme xmlns:a=\"{}\" name=\"Office Theme\">", NS_DRAWING));
    xml.push_str("<a:themeElements>");
    xml.push_str("<a:clrScheme name=\"Office\">");
    xml.push_str("<a:dk1><a:sysClr val=\"windowText\" lastClr=\"000000\"/></a:dk1>");
    xml.push_str("<a:lt1><a:sysClr val=\"window\" lastClr=\"FFFFFF\"/></a:lt1>");
    xml.push_str("<a:dk2><a:srgbClr val=\"44546A\"/></a:dk2>");
    xml.push_str("<a:lt2><a:srgbClr val=\"E7E6E6\"/></a:lt2>");
    xml.push_str(&format!("<a:accent1><a:srgbClr val=\"{}\"/></a:accent1>", ACCENT_COLOR));
    xml.push_str("<a:accent2><a:srgbClr val=\"ED7D31\"/></a:accent2>");
    xml.push_str("<a:accent3><a:srgbClr val=\"A5A5A5\"/></a:accent3>");
    xml.push_str("<a:accent4><a:srgbClr val=\"FFC000\"/></a:accent4>");
    xml.push_str("<a:accent5><a:srgbClr val=\"4472C4\"/></a:accent5>");
    xml.push_str("<a:accent6><a:srgbClr val=\"70AD47\"/></a:accent6>");
    xml.push_str("<a:hlink><a:srgbClr val=\"0563C1\"/></a:hlink>");
    xml.push_str("<a:folHlink><a:srgbClr val=\"954F72\"/></a:folHlink>");
    xml.push_str("</a:clrScheme>");
    xml.push_str("<a:fontScheme name=\"Office\">");
    xml.push_str("<a:majorFont><a:latin typeface=\"Calibri Light\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>");
    xml.push_str("<a:minorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>");
    xml.push_str("</a:fontScheme>");
    xml.push_str("<a:fmtScheme name=\"Office\">");
    xml.push_str("<a:fillStyleLst>");
    xml.push_str("<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>");
    xml.push_str("<a:solidFill><a:schemeClr val=\"phClr\"><a:tint val=\"50000\"/></a:schemeClr></a:solidFill>");
    xml.push_str("<a:solidFill><a:schemeClr val=\"phClr\"><a:shade val=\"75000\"/></a:schemeClr></a:solidFill>");
    xml.push_str("</a:fillStyleLst>");
    xml.push_str("<a:lnStyleLst>");
    xml.push_str("<a:ln w=\"6350\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>");
    xml.push_str("<a:ln w=\"12700\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>");
    xml.push_str("<a:ln w=\"19050\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>");
    xml.push_str("</a:lnStyleLst>");
    xml.push_str("<a:effectStyleLst>");
    xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    xml.push_str("</a:effectStyleLst>");
    xml.push_str("<a:bgFillStyleLst>");
    xml.push_str("<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>");
    xml.push_str("<a:solidFill><a:schemeClr val=\"phClr\"><a:tint val=\"95000\"/></a:schemeClr></a:solidFill>");
    xml.push_str("<a:solidFill><a:schemeClr val=\"phClr\"><a:shade val=\"85000\"/></a:schemeClr></a:solidFill>");
    xml.push_str("</a:bgFillStyleLst>");
    xml.push_str("</a:fmtScheme>");
    xml.push_str("</a:themeElements>");
    xml.push_str("<a:objectDefaults/><a:extraClrSchemeLst/>");
    xml.push_str("</a:theme>");
    xml
}

/// An empty shape tree (just the required group shape header).
fn empty_sp_tree() -> String {
    String::from(
        "<p:spTree><p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/><a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr></p:spTree>",
    )
}

/// `ppt/slideMasters/slideMaster1.xml`: shared by every slide.
pub fn slide_master() -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(&format!(
        "<p:sldMaster xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\">",
        NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
    ));
    xml.push_str("<p:cSld><p:bg><p:bgPr><a:solidFill><a:srgbClr val=\"FFFFFF\"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>");
    xml.push_str(&empty_sp_tree());
    xml.push_str("</p:cSld>");
    xml.push_str("<p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>");
    xml.push_str("<p:sldLayoutIdLst><p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/></p:sldLayoutIdLst>");
    xml.push_str("<p:txStyles>");
    xml.push_str("<p:titleStyle><a:lvl1pPr><a:defRPr sz=\"4400\"/></a:lvl1pPr></p:titleStyle>");
    xml.push_str("<p:bodyStyle><a:lvl1pPr><a:defRPr sz=\"1800\"/></a:lvl1pPr></p:bodyStyle>");
    xml.push_str("<p:otherStyle><a:lvl1pPr><a:defRPr sz=\"1800\"/></a:lvl1pPr></p:otherStyle>");
    xml.push_str("</p:txStyles>");
    xml.push_str("</p:sldMaster>");
    xml
}

/// `ppt/slideLayouts/slideLayout1.xml`: one blank layout, shared.
pub fn slide_layout() -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(&format!(
        "<p:sldLayout xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\" type=\"blank\" preserve=\"1\">",
        NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
    ));
    xml.push_str("<p:cSld name=\"Blank\">");
    xml.push_str(&empty_sp_tree());
    xml.push_str("</p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sldLayout>");
    xml
}

/// A text box shape. Position and extent in inches.
fn text_box(
    id: u32,
    name: &str,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    style: &TextStyle,
    align_right: bool,
    text: &str,
) -> String {
    let mut xml = String::new();
    xml.push_str(&format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{}\" name=\"{}\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>",
        id, name
    ));
    xml.push_str(&format!(
        "<p:spPr><a:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"{}\"/></a:xfrm><a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>",
        emu(x),
        emu(y),
        emu(w),
        emu(h)
    ));
    xml.push_str("<p:txBody><a:bodyPr wrap=\"square\" rtlCol=\"0\"/><a:lstStyle/><a:p>");
    if align_right {
        xml.push_str("<a:pPr algn=\"r\"/>");
    }
    xml.push_str(&format!(
        "<a:r><a:rPr lang=\"en-US\" sz=\"{}\"{} dirty=\"0\">",
        style.size,
        if style.bold { " b=\"1\"" } else { "" }
    ));
    if let Some(color) = &style.color {
        xml.push_str(&format!("<a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>", color));
    }
    xml.push_str(&format!("</a:rPr><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp>", escape(text)));
    xml
}

/// A borderless solid-fill rectangle. Position and extent in inches.
fn solid_rect(id: u32, name: &str, x: f64, y: f64, w: f64, h: f64, color: &str) -> String {
    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{}\" name=\"{}\"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"{}\"/></a:xfrm><a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom><a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill><a:ln><a:noFill/></a:ln></p:spPr><p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody></p:sp>",
        id,
        name,
        emu(x),
        emu(y),
        emu(w),
        emu(h),
        color
    )
}

/// One slide part. Fixed visual order: title box, optional subtitle box,
/// optional period box, corner logo box, accent bar beneath the title
/// block, bottom-edge bar.
pub fn slide(params: &SlideParams) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(&format!(
        "<p:sld xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\">",
        NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
    ));
    xml.push_str("<p:cSld><p:spTree>");
    xml.push_str("<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>");
    xml.push_str("<p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/><a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>");

    let mut id = 2;
    xml.push_str(&text_box(
        id,
        "Title",
        0.5,
        1.5,
        9.0,
        1.0,
        &params.title_style,
        false,
        params.title,
    ));
    id += 1;

    if !params.subtitle.is_empty() {
        xml.push_str(&text_box(
            id,
            "Subtitle",
            0.5,
            2.5,
            9.0,
            1.0,
            &params.subtitle_style,
            false,
            params.subtitle,
        ));
        id += 1;
    }

    if !params.period.is_empty() {
        let period_style = TextStyle::new(1800, false, Some(PERIOD_COLOR));
        let line = format!("Period: {}", params.period);
        xml.push_str(&text_box(id, "Period", 0.5, 3.5, 9.0, 0.5, &period_style, false, &line));
        id += 1;
    }

    let logo_style = TextStyle::new(1800, false, Some(LOGO_COLOR));
    xml.push_str(&text_box(id, "Logo", 8.0, 0.3, 1.5, 0.5, &logo_style, true, LOGO_TEXT));
    id += 1;

    xml.push_str(&solid_rect(id, "TitleBar", 0.5, 1.2, 9.0, 0.05, ACCENT_COLOR));
    id += 1;
    xml.push_str(&solid_rect(id, "BottomBar", 0.0, 5.3, 10.0, 0.05, ACCENT_COLOR));

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    xml
}
