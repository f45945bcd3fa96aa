//! Error types for the RAG crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in RAG operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// Embedding operation failed.
    #[error("embedding failed: {0}")]
    Embedding(#[source] anyhow::Error),

    /// Persistence operation failed.
    #[error("persistence error at {path}: {source}")]
    Persistence {
        /// Path where the error occurred.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Dimension mismatch between embedding and index.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension provided.
        actual: usize,
    },

    /// Append was requested but no snapshot has been built yet.
    #[error("no index snapshot at {path}; run a build first")]
    MissingSnapshot {
        /// The missing snapshot file.
        path: PathBuf,
    },

    /// A build produced no embedded chunks.
    #[error("no embeddings created")]
    NoEmbeddings,

    /// Vector count and chunk count disagree.
    #[error("index holds {vectors} vectors but chunk store holds {texts} texts")]
    Misaligned {
        /// Vectors in the index.
        vectors: usize,
        /// Texts in the chunk store.
        texts: usize,
    },

    /// A source document could not be turned into text.
    #[error("failed to load {path}: {reason}")]
    Load {
        /// The document.
        path: PathBuf,
        /// Human-readable cause.
        reason: String,
    },

    /// CSV decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// DOCX container or XML decoding failed.
    #[error("DOCX error: {0}")]
    Docx(String),

    /// PDF text extraction failed.
    #[error("PDF error: {0}")]
    Pdf(#[from] sowkit_pdf_process::PdfProcessError),

    /// Configuration values are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
