//! Core domain types, error taxonomy, and style mapping
//! for HTML slide deck to PPTX conversion.

pub mod error;
pub mod style;
pub mod types;

pub use error::{Error, Result};
pub use style::{resolve_style, StyleDecl};
pub use types::{Slide, SlideElement, SlideMetadata};
