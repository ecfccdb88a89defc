//! Style class mapping for presentational markup hints.
//!
//! Maps utility class tokens and inline style strings onto a small fixed
//! style vocabulary. Presentational markup is a hint, not a contract:
//! unrecognized tokens are ignored, never surfaced.

use serde::{Deserialize, Serialize};

/// Text size classes mapped to explicit point sizes.
const SIZE_MAP: &[(&str, &str)] = &[
    ("text-5xl", "36pt"),
    ("text-4xl", "28pt"),
    ("text-3xl", "24pt"),
    ("text-2xl", "20pt"),
    ("text-xl", "18pt"),
    ("text-lg", "16pt"),
    ("text-base", "14pt"),
    ("text-sm", "12pt"),
];

/// Fallback for size-like tokens outside the table.
const DEFAULT_SIZE: &str = "14pt";

/// Background classes mapped to colors.
const BG_MAP: &[(&str, &str)] = &[
    ("bg-purple-50", "#f3e8ff"),
    ("bg-gray-50", "#f9fafb"),
    ("bg-white", "#ffffff"),
];

/// Fallback for background tokens outside the table.
const DEFAULT_BG: &str = "#ffffff";

/// Accent color for purple text classes.
const PURPLE: &str = "#8a2be2";

/// Muted color for gray text classes.
const GRAY: &str = "#666666";

/// A resolved style declaration over the fixed key set.
///
/// Produced fresh per element and never mutated after creation. Values
/// are strings in the vocabulary the templates accept (`"36pt"`,
/// `"#8a2be2"`, `"bold"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDecl {
    /// Font size, e.g. `"36pt"`.
    pub font_size: Option<String>,

    /// Text color, e.g. `"#8a2be2"`.
    pub color: Option<String>,

    /// Font weight; only `"bold"` is produced from class tokens.
    pub font_weight: Option<String>,

    /// Background color, e.g. `"#f3e8ff"`.
    pub background_color: Option<String>,
}

impl StyleDecl {
    /// True if no key has a value.
    pub fn is_empty(&self) -> bool {
        self.font_size.is_none()
            && self.color.is_none()
            && self.font_weight.is_none()
            && self.background_color.is_none()
    }
}

/// Resolve a style declaration from a whitespace-separated class attribute
/// and an optional inline `key:value;...` style string.
///
/// Class-derived properties are applied first; inline properties override
/// them on key collision. Pure: identical inputs always yield an identical
/// declaration.
pub fn resolve_style(class_attr: &str, inline_style: Option<&str>) -> StyleDecl {
    let mut decl = StyleDecl::default();

    for token in class_attr.split_whitespace() {
        apply_class_token(&mut decl, token);
    }

    if let Some(style_str) = inline_style {
        apply_inline_style(&mut decl, style_str);
    }

    decl
}

/// Apply a single class token to the declaration.
fn apply_class_token(decl: &mut StyleDecl, token: &str) {
    if let Some(size) = map_text_size(token) {
        decl.font_size = Some(size.to_string());
    } else if token.starts_with("text-purple") {
        decl.color = Some(PURPLE.to_string());
    } else if token.starts_with("text-gray") {
        decl.color = Some(GRAY.to_string());
    } else if token == "font-bold" {
        decl.font_weight = Some("bold".to_string());
    } else if token.starts_with("bg-") {
        decl.background_color = Some(map_bg_color(token).to_string());
    }
    // Anything else is not part of the vocabulary; ignore it.
}

/// Map a text size token to a point size, or None if the token is not
/// size-like. Size-like tokens outside the table get the default size.
fn map_text_size(token: &str) -> Option<&'static str> {
    if let Some((_, size)) = SIZE_MAP.iter().find(|(cls, _)| *cls == token) {
        return Some(size);
    }
    // Tokens like text-6xl are size-like but unrecognized.
    if token.starts_with("text-") && token.ends_with("xl") {
        return Some(DEFAULT_SIZE);
    }
    None
}

/// Map a background class token to a color.
fn map_bg_color(token: &str) -> &'static str {
    BG_MAP
        .iter()
        .find(|(cls, _)| *cls == token)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_BG)
}

/// Apply inline `key:value;...` properties, keeping only the fixed key set.
fn apply_inline_style(decl: &mut StyleDecl, style_str: &str) {
    for prop in style_str.split(';') {
        let Some((key, value)) = prop.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.trim() {
            "font-size" => decl.font_size = Some(value.to_string()),
            "color" => decl.color = Some(value.to_string()),
            "font-weight" => decl.font_weight = Some(value.to_string()),
            "background-color" => decl.background_color = Some(value.to_string()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_table() {
        assert_eq!(
            resolve_style("text-5xl", None).font_size.as_deref(),
            Some("36pt")
        );
        assert_eq!(
            resolve_style("text-2xl", None).font_size.as_deref(),
            Some("20pt")
        );
        assert_eq!(
            resolve_style("text-sm", None).font_size.as_deref(),
            Some("12pt")
        );
    }

    #[test]
    fn test_unrecognized_size_like_token_gets_default() {
        assert_eq!(
            resolve_style("text-6xl", None).font_size.as_deref(),
            Some("14pt")
        );
    }

    #[test]
    fn test_color_tokens() {
        assert_eq!(
            resolve_style("text-purple-800", None).color.as_deref(),
            Some("#8a2be2")
        );
        assert_eq!(
            resolve_style("text-gray-600", None).color.as_deref(),
            Some("#666666")
        );
    }

    #[test]
    fn test_bold_and_background() {
        let decl = resolve_style("font-bold bg-purple-50", None);
        assert_eq!(decl.font_weight.as_deref(), Some("bold"));
        assert_eq!(decl.background_color.as_deref(), Some("#f3e8ff"));
    }

    #[test]
    fn test_unknown_bg_falls_back_to_white() {
        assert_eq!(
            resolve_style("bg-blue-100", None).background_color.as_deref(),
            Some("#ffffff")
        );
    }

    #[test]
    fn test_unrecognized_tokens_are_ignored() {
        let decl = resolve_style("flex items-center mx-auto", None);
        assert!(decl.is_empty());
    }

    #[test]
    fn test_inline_overrides_classes() {
        let decl = resolve_style("text-5xl text-gray-600", Some("color: #112233; font-size: 10pt"));
        assert_eq!(decl.font_size.as_deref(), Some("10pt"));
        assert_eq!(decl.color.as_deref(), Some("#112233"));
    }

    #[test]
    fn test_inline_unknown_keys_dropped() {
        let decl = resolve_style("", Some("margin: 4px; padding: 2px"));
        assert!(decl.is_empty());
    }

    #[test]
    fn test_inline_malformed_properties_skipped() {
        let decl = resolve_style("", Some("no-colon-here; color: #abcdef;;"));
        assert_eq!(decl.color.as_deref(), Some("#abcdef"));
        assert!(decl.font_size.is_none());
    }

    #[test]
    fn test_pure_and_idempotent() {
        let a = resolve_style("text-3xl font-bold bg-white", Some("color:#666666"));
        let b = resolve_style("text-3xl font-bold bg-white", Some("color:#666666"));
        assert_eq!(a, b);
    }
}
