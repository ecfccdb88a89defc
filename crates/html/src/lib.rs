//! HTML slide deck parser.
//!
//! Consumes the constrained slide markup dialect as a forward stream of
//! tag events and produces an ordered sequence of [`deck_core::Slide`]
//! trees with per-slide metadata.

pub mod parser;

pub use parser::SlideHtmlParser;
