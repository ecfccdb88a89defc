//! Converter facade: HTML source in, PPTX file out.

use crate::builder::PptxBuilder;
use crate::package::Strategy;
use deck_core::{Error, Result};
use deck_html::SlideHtmlParser;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Extension given to derived output paths.
const OUTPUT_EXTENSION: &str = "pptx";

/// Converts HTML slide deck markup into a PPTX file.
///
/// One conversion call owns its own parser and builder state; separate
/// converters can run concurrently with no shared state. The package is
/// built into a temporary file in the destination directory and only
/// moved into place on success, so a failing conversion never leaves a
/// partial file at the destination.
pub struct Converter {
    strategy: Strategy,
}

impl Converter {
    /// Create a converter using the default assembly strategy.
    pub fn new() -> Self {
        Self {
            strategy: Strategy::default(),
        }
    }

    /// Force native (staged directory) package construction.
    pub fn native(mut self, native: bool) -> Self {
        if native {
            self.strategy = Strategy::Staged;
        }
        self
    }

    /// Convert an HTML file. Returns the resolved output path.
    ///
    /// When `output` is None the destination is the input path with its
    /// extension replaced by `.pptx`.
    pub fn convert_file(&self, input: &Path, output: Option<&Path>) -> Result<PathBuf> {
        if !input.is_file() {
            return Err(Error::InputNotFound(input.to_path_buf()));
        }
        let html = fs::read_to_string(input)
            .map_err(|e| Error::InputRead(format!("{}: {}", input.display(), e)))?;

        let output = match output {
            Some(path) => path.to_path_buf(),
            None => input.with_extension(OUTPUT_EXTENSION),
        };
        self.convert_str(&html, &output)?;
        Ok(output)
    }

    /// Convert in-memory HTML content to a PPTX file at `output`.
    pub fn convert_str(&self, html: &str, output: &Path) -> Result<()> {
        let slides = SlideHtmlParser::new().parse(html)?;
        if slides.is_empty() {
            return Err(Error::NoSlides);
        }
        log::debug!("parsed {} slides", slides.len());

        let dir = output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let staging = NamedTempFile::new_in(dir)
            .map_err(|e| Error::Packaging(format!("failed to create temporary output: {}", e)))?;

        PptxBuilder::new()
            .with_strategy(self.strategy)
            .build(&slides, staging.path())?;

        staging.persist(output).map_err(|e| {
            Error::Packaging(format!(
                "failed to place output at {}: {}",
                output.display(),
                e.error
            ))
        })?;
        Ok(())
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;
    use tempfile::TempDir;

    const DECK: &str = r#"
<div class="slide-container">
  <h1 class="text-5xl font-bold">Alpha</h1>
  <h2 class="text-3xl text-purple-800">Beta</h2>
  <div class="content">Period: 2024 H1</div>
</div>
<div class="slide-container"><h1>Gamma</h1></div>
"#;

    #[test]
    fn test_convert_file_missing_input() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.html");
        let err = Converter::new().convert_file(&missing, None).unwrap_err();
        assert!(matches!(err, Error::InputNotFound(_)));
    }

    #[test]
    fn test_convert_file_derives_output_path() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("deck.html");
        std::fs::write(&input, DECK).unwrap();

        let output = Converter::new().convert_file(&input, None).unwrap();
        assert_eq!(output, dir.path().join("deck.pptx"));
        assert!(output.exists());
        assert_eq!(testutil::entry_names(&output)[0], "[Content_Types].xml");
    }

    #[test]
    fn test_convert_str_without_slides_leaves_destination_alone() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.pptx");
        let err = Converter::new()
            .convert_str("<p>no slides here</p>", &dest)
            .unwrap_err();
        assert!(matches!(err, Error::NoSlides));
        assert!(!dest.exists());
        // The staging temp file is gone too.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_convert_str_produces_expected_slides() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.pptx");
        Converter::new().convert_str(DECK, &dest).unwrap();

        let names = testutil::entry_names(&dest);
        assert!(names.contains(&"ppt/slides/slide1.xml".to_string()));
        assert!(names.contains(&"ppt/slides/slide2.xml".to_string()));
        assert!(!names.contains(&"ppt/slides/slide3.xml".to_string()));

        let texts = testutil::slide_texts(&testutil::read_part(&dest, "ppt/slides/slide1.xml"));
        assert!(texts.iter().any(|t| t == "Alpha"));
        assert!(texts.iter().any(|t| t == "Beta"));
        assert!(texts.iter().any(|t| t == "Period: 2024 H1"));
    }

    #[test]
    fn test_native_strategy_end_to_end() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("native.pptx");
        Converter::new().native(true).convert_str(DECK, &dest).unwrap();
        assert_eq!(testutil::entry_names(&dest)[0], "[Content_Types].xml");
    }

    #[test]
    fn test_reconversion_is_semantically_stable() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.pptx");
        let b = dir.path().join("b.pptx");
        Converter::new().convert_str(DECK, &a).unwrap();
        Converter::new().convert_str(DECK, &b).unwrap();

        assert_eq!(testutil::entry_names(&a), testutil::entry_names(&b));
        for name in ["ppt/slides/slide1.xml", "ppt/slides/slide2.xml"] {
            assert_eq!(
                testutil::slide_texts(&testutil::read_part(&a, name)),
                testutil::slide_texts(&testutil::read_part(&b, name))
            );
        }
    }
}
