//! Package parts, relationships, and the two archive assembly strategies.

use deck_core::{Error, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Relationship type for the package-level office document entry.
pub const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

/// Relationship type for core document properties.
pub const REL_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";

/// Relationship type for extended (app) properties.
pub const REL_APP_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";

/// Relationship type for a slide master.
pub const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";

/// Relationship type for a slide layout.
pub const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";

/// Relationship type for a slide.
pub const REL_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

/// Relationship type for a theme.
pub const REL_THEME: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

/// One named entry of the output package.
///
/// `path` is the archive-internal path with forward slashes
/// (`ppt/slides/slide1.xml`); relationship files and the content-types
/// manifest are parts like any other.
#[derive(Debug, Clone)]
pub struct PackagePart {
    pub path: String,
    pub bytes: Vec<u8>,
}

impl PackagePart {
    pub fn new(path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            bytes: bytes.into(),
        }
    }
}

/// A typed reference from one part to another, rendered into the
/// owning part's sibling `.rels` file.
#[derive(Debug, Clone)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
}

impl Relationship {
    pub fn new(
        id: impl Into<String>,
        rel_type: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            rel_type: rel_type.into(),
            target: target.into(),
        }
    }
}

/// Serializes a staged part list into the destination archive.
///
/// Implementations are interchangeable and selected once per conversion,
/// never mixed. Parts must be written in list order; the builder places
/// the content-types manifest first.
pub trait Assembler {
    fn assemble(&self, parts: &[PackagePart], destination: &Path) -> Result<()>;
}

/// Which assembler a conversion uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Stage part bytes in memory and stream them into the archive.
    #[default]
    InMemory,
    /// Stage parts on disk in the package folder layout, then read the
    /// tree back into the archive (native construction).
    Staged,
}

impl Strategy {
    /// The assembler implementing this strategy.
    pub fn assembler(self) -> &'static dyn Assembler {
        match self {
            Strategy::InMemory => &MemoryAssembler,
            Strategy::Staged => &StagedAssembler,
        }
    }
}

fn deflated() -> FileOptions {
    FileOptions::default().compression_method(CompressionMethod::Deflated)
}

fn write_parts<W: Write + std::io::Seek>(
    writer: &mut ZipWriter<W>,
    parts: &[PackagePart],
) -> Result<()> {
    for part in parts {
        writer
            .start_file(part.path.as_str(), deflated())
            .map_err(|e| Error::Zip(format!("failed to start entry '{}': {}", part.path, e)))?;
        writer
            .write_all(&part.bytes)
            .map_err(|e| Error::Zip(format!("failed to write entry '{}': {}", part.path, e)))?;
    }
    Ok(())
}

/// Streams in-memory part bytes straight into one archive.
pub struct MemoryAssembler;

impl Assembler for MemoryAssembler {
    fn assemble(&self, parts: &[PackagePart], destination: &Path) -> Result<()> {
        let file = File::create(destination).map_err(|e| {
            Error::Packaging(format!("failed to create {}: {}", destination.display(), e))
        })?;
        let mut writer = ZipWriter::new(file);
        write_parts(&mut writer, parts)?;
        writer
            .finish()
            .map_err(|e| Error::Zip(format!("failed to finish archive: {}", e)))?;
        Ok(())
    }
}

/// Stages every part under a scoped temporary directory mirroring the
/// package folder layout, then reads each staged file back into the
/// archive. The staging directory is removed on every exit path,
/// including failure.
pub struct StagedAssembler;

impl Assembler for StagedAssembler {
    fn assemble(&self, parts: &[PackagePart], destination: &Path) -> Result<()> {
        let staging = TempDir::new()
            .map_err(|e| Error::Packaging(format!("failed to create staging directory: {}", e)))?;

        for part in parts {
            let staged = staging.path().join(&part.path);
            if let Some(parent) = staged.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::Packaging(format!("failed to stage {}: {}", part.path, e))
                })?;
            }
            fs::write(&staged, &part.bytes)
                .map_err(|e| Error::Packaging(format!("failed to stage {}: {}", part.path, e)))?;
        }

        let file = File::create(destination).map_err(|e| {
            Error::Packaging(format!("failed to create {}: {}", destination.display(), e))
        })?;
        let mut writer = ZipWriter::new(file);
        for part in parts {
            let staged = staging.path().join(&part.path);
            let bytes = fs::read(&staged).map_err(|e| {
                Error::Packaging(format!("failed to read staged {}: {}", part.path, e))
            })?;
            writer
                .start_file(part.path.as_str(), deflated())
                .map_err(|e| Error::Zip(format!("failed to start entry '{}': {}", part.path, e)))?;
            writer
                .write_all(&bytes)
                .map_err(|e| Error::Zip(format!("failed to write entry '{}': {}", part.path, e)))?;
        }
        writer
            .finish()
            .map_err(|e| Error::Zip(format!("failed to finish archive: {}", e)))?;
        Ok(())
        // `staging` drops here; the directory is gone even when `?` fired.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn sample_parts() -> Vec<PackagePart> {
        vec![
            PackagePart::new("[Content_Types].xml", "<Types/>".as_bytes()),
            PackagePart::new("ppt/slides/slide1.xml", "<p:sld/>".as_bytes()),
        ]
    }

    fn entry_names(path: &Path) -> Vec<String> {
        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_memory_assembler_roundtrip() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.pptx");
        MemoryAssembler.assemble(&sample_parts(), &dest).unwrap();

        let names = entry_names(&dest);
        assert_eq!(names[0], "[Content_Types].xml");
        assert_eq!(names[1], "ppt/slides/slide1.xml");

        let mut archive = ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let mut content = String::new();
        archive
            .by_name("ppt/slides/slide1.xml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "<p:sld/>");
    }

    #[test]
    fn test_staged_assembler_roundtrip() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.pptx");
        StagedAssembler.assemble(&sample_parts(), &dest).unwrap();

        let names = entry_names(&dest);
        assert_eq!(names[0], "[Content_Types].xml");
        assert!(names.contains(&"ppt/slides/slide1.xml".to_string()));
    }

    #[test]
    fn test_strategies_produce_equivalent_archives() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.pptx");
        let b = dir.path().join("b.pptx");
        let parts = sample_parts();
        MemoryAssembler.assemble(&parts, &a).unwrap();
        StagedAssembler.assemble(&parts, &b).unwrap();
        assert_eq!(entry_names(&a), entry_names(&b));
    }

    #[test]
    fn test_assemble_fails_cleanly_on_bad_destination() {
        let parts = sample_parts();
        let dest = Path::new("/nonexistent-dir/out.pptx");
        let err = MemoryAssembler.assemble(&parts, dest).unwrap_err();
        assert!(matches!(err, Error::Packaging(_)));
        let err = StagedAssembler.assemble(&parts, dest).unwrap_err();
        assert!(matches!(err, Error::Packaging(_)));
    }
}
