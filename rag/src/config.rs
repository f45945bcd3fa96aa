//! Configuration for ingestion and retrieval.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{RagError, Result};

/// File name of the vector index snapshot.
pub const INDEX_FILE: &str = "index.bin";
/// File name of the chunk store snapshot.
pub const CHUNKS_FILE: &str = "chunks.bin";
/// File name of the ingestion manifest.
pub const MANIFEST_FILE: &str = "processed_files.json";

/// Extensions ingested by default.
pub const DEFAULT_EXTENSIONS: [&str; 8] = ["pdf", "doc", "docx", "csv", "html", "htm", "txt", "md"];

/// Configuration for ingestion and retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RagConfig {
    /// Directory scanned for source documents.
    pub input_dir: PathBuf,
    /// Directory holding the snapshot and manifest.
    pub output_dir: PathBuf,
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Characters shared by adjacent chunks.
    pub chunk_overlap: usize,
    /// Default number of results to return.
    pub top_k: usize,
    /// Lower-case extensions (without the dot) eligible for ingestion.
    pub extensions: BTreeSet<String>,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            chunk_size: 500,
            chunk_overlap: 100,
            top_k: 5,
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl RagConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for custom configuration.
    #[must_use]
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::new()
    }

    /// Path of the vector index snapshot.
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.output_dir.join(INDEX_FILE)
    }

    /// Path of the chunk store snapshot.
    #[must_use]
    pub fn chunks_path(&self) -> PathBuf {
        self.output_dir.join(CHUNKS_FILE)
    }

    /// Path of the ingestion manifest.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(MANIFEST_FILE)
    }

    /// Whether `path` carries an allow-listed extension.
    #[must_use]
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_ascii_lowercase()))
    }

    /// Checks that the chunking parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidConfig`] if `chunk_size` is zero or not larger than `chunk_overlap`.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(RagError::InvalidConfig("chunk_size must be positive".into()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(RagError::InvalidConfig(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Builder for RAG configuration.
#[derive(Debug, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Creates a new configuration builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: RagConfig::default(),
        }
    }

    /// Sets the source directory.
    #[must_use]
    pub fn input_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.input_dir = path.into();
        self
    }

    /// Sets the snapshot directory.
    #[must_use]
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_dir = path.into();
        self
    }

    /// Sets the maximum chunk length in characters.
    #[must_use]
    pub const fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Sets the overlap between adjacent chunks.
    #[must_use]
    pub const fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Sets the default number of results to return.
    #[must_use]
    pub const fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Replaces the extension allow-list.
    #[must_use]
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// See [`RagConfig::validate`].
    pub fn build(self) -> Result<RagConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
