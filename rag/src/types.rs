//! Core types for the RAG crate.

use serde::{Deserialize, Serialize};

/// Plain text of one page of a source document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Bare file name of the source document.
    pub source_file: String,
    /// 1-based page (or record) number within the file.
    pub number: usize,
    /// Extracted text.
    pub text: String,
}

impl Page {
    /// Creates a page.
    #[must_use]
    pub fn new(source_file: impl Into<String>, number: usize, text: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            number,
            text: text.into(),
        }
    }
}

/// A chunk of text derived from a source file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content of the chunk.
    pub text: String,
    /// Bare file name of the source document.
    pub source_file: String,
    /// Index of this chunk within its source file, counted across pages.
    pub position: usize,
}

/// A retrieved chunk with its index position and distance to the query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Position in the chunk store.
    pub position: usize,
    /// Squared Euclidean distance to the query (lower is closer).
    pub distance: f32,
    /// Chunk text.
    pub text: String,
}
