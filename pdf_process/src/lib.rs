//! PDF helpers for the document pipeline.
//!
//! Two directions are covered: [`PdfProcessor`] extracts plain text page by page so the loader
//! can tag every chunk with its source, and [`render_html`] lays a generated HTML document out
//! as a printable A4 PDF.

mod error;
mod html;
mod parser;
mod render;

pub use error::{PdfProcessError, Result};
pub use html::{Block, html_blocks};
pub use render::render_blocks;

use std::path::{Path, PathBuf};

/// Text of one PDF page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfPage {
    /// 1-based page number.
    pub number: u32,
    /// Normalized text; empty for image-only pages.
    pub text: String,
}

/// PDF processor entrypoint.
#[derive(Debug, Clone)]
pub struct PdfProcessor {
    source: PdfSource,
}

#[derive(Debug, Clone)]
enum PdfSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl PdfProcessor {
    /// Build a processor from a PDF file path.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: PdfSource::Path(path.into()),
        }
    }

    /// Build a processor from PDF bytes.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            source: PdfSource::Bytes(bytes.into()),
        }
    }

    /// Extracts every page in page order.
    ///
    /// # Errors
    ///
    /// Returns [`PdfProcessError::Parse`] when the input is not a readable PDF.
    pub fn pages(&self) -> Result<Vec<PdfPage>> {
        match &self.source {
            PdfSource::Path(path) => parser::parse_from_path(path),
            PdfSource::Bytes(bytes) => parser::parse_from_bytes(bytes),
        }
    }

    /// Returns source path if available.
    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        match &self.source {
            PdfSource::Path(path) => Some(path.as_path()),
            PdfSource::Bytes(_) => None,
        }
    }
}

/// Renders an HTML fragment to PDF bytes, followed by `trailer` blocks.
///
/// # Errors
///
/// Returns [`PdfProcessError::Render`] if the document cannot be serialized.
pub fn render_html(html: &str, trailer: &[Block]) -> Result<Vec<u8>> {
    let mut blocks = html_blocks(html);
    blocks.extend_from_slice(trailer);
    render_blocks(&blocks)
}
