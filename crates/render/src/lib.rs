//! Page-level drawing primitives and PDF document assembly.
//!
//! [`PageCanvas`] records draw operations; [`DocumentAssembler`] serializes
//! finished pages into a PDF byte stream with embedded fonts and metadata.

use thiserror::Error;

pub mod assembler;
pub mod canvas;
pub mod document;

pub use assembler::DocumentAssembler;
pub use canvas::{DrawOp, PageCanvas};
pub use document::{DocumentMeta, Page, RenderedDocument};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}
