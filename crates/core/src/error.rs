//! Error types for HTML slide deck conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during HTML to PPTX conversion.
///
/// Parse-time anomalies (mismatched tags, unrecognized style tokens) are
/// tolerated and never surface here; the variants below are the fatal
/// outcomes a caller can distinguish.
#[derive(Error, Debug)]
pub enum Error {
    /// The input path does not resolve to a readable file.
    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    /// The input file exists but could not be read.
    #[error("failed to read input: {0}")]
    InputRead(String),

    /// Parsing yielded zero slide containers; nothing to build.
    #[error("no slide containers found in input")]
    NoSlides,

    /// A hardening bound on input size or nesting was exceeded.
    #[error("input exceeds limits: {0}")]
    LimitExceeded(String),

    /// I/O failure while staging or writing package parts.
    #[error("packaging error: {0}")]
    Packaging(String),

    /// ZIP archive serialization error.
    #[error("ZIP error: {0}")]
    Zip(String),
}
