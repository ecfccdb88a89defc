//! PPTX (Office Open XML) builder backend for HTML slide deck conversion.
//!
//! Produces .pptx files, which are ZIP archives of interrelated XML parts:
//! templates render each part, the package assembler serializes the part
//! list into the archive, and the converter facade wires parsing, building,
//! and file placement together.

pub mod builder;
pub mod convert;
pub mod package;
pub mod templates;

#[cfg(test)]
mod testutil;

pub use builder::PptxBuilder;
pub use convert::Converter;
pub use package::{
    Assembler, MemoryAssembler, PackagePart, Relationship, StagedAssembler, Strategy,
};
