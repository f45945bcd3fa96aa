//! Build and append ingestion runs.
//!
//! Both runs go through the same pipeline: load pages, split them into chunks, embed each chunk
//! in order and push it into a [`Snapshot`]. Failures of single files or chunks are recorded in
//! the [`IngestReport`] and the run carries on.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use sowkit_core::EmbeddingModel;

use crate::chunking::{Chunker, RecursiveChunker};
use crate::config::RagConfig;
use crate::error::{RagError, Result};
use crate::loader::{DocumentLoader, FileOutcome};
use crate::manifest::Manifest;
use crate::persistence::{Persistence, RkyvPersistence, Snapshot, commit};
use crate::types::Chunk;

/// A chunk that could not be added to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkFailure {
    /// Bare file name of the chunk's source.
    pub source_file: String,
    /// Position of the chunk within its source file.
    pub position: usize,
    /// Human-readable cause.
    pub reason: String,
}

/// Summary of an ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// One outcome per file considered.
    pub files: Vec<FileOutcome>,
    /// Chunks produced by the chunker.
    pub chunks_total: usize,
    /// Chunks embedded and stored.
    pub chunks_embedded: usize,
    /// Chunks dropped.
    pub failures: Vec<ChunkFailure>,
    /// Files added to the manifest by this run.
    pub recorded: Vec<String>,
    /// Vectors in the snapshot after the run.
    pub vectors: usize,
    /// `true` if there was nothing to do.
    pub noop: bool,
}

impl IngestReport {
    fn noop() -> Self {
        Self {
            noop: true,
            ..Self::default()
        }
    }
}

/// Runs build and append ingestion against one output directory.
///
/// # Example
///
/// ```rust,ignore
/// use sowkit_rag::{Ingestor, RagConfig};
///
/// let config = RagConfig::builder().input_dir("input").output_dir("output").build()?;
/// let report = Ingestor::new(embedder, config)?.build().await?;
/// println!("indexed {} chunks", report.chunks_embedded);
/// ```
#[derive(Debug)]
pub struct Ingestor<M> {
    model: M,
    config: RagConfig,
    loader: DocumentLoader,
    chunker: RecursiveChunker,
    persistence: RkyvPersistence,
}

impl<M: EmbeddingModel> Ingestor<M> {
    /// Creates an ingestor.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidConfig`] if the chunking settings are inconsistent.
    pub fn new(model: M, config: RagConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            loader: DocumentLoader::new(&config),
            chunker: RecursiveChunker::from_config(&config)?,
            persistence: RkyvPersistence::from_config(&config),
            model,
            config,
        })
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Indexes every file in the input directory, replacing any previous snapshot.
    ///
    /// The manifest is rewritten with the files that made it into the index, so a following
    /// [`append`](Self::append) only picks up files added afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::NoEmbeddings`] if not a single chunk was embedded; nothing is written
    /// in that case. Directory listing and persistence errors are also returned.
    pub async fn build(&self) -> Result<IngestReport> {
        let files = self.loader.scan(&self.config.input_dir)?;
        let mut snapshot = Snapshot::default();
        let mut report = self.ingest(&files, &mut snapshot).await;

        if snapshot.is_empty() {
            tracing::error!("No embeddings created");
            return Err(RagError::NoEmbeddings);
        }

        let manifest: Manifest = report.recorded.iter().cloned().collect();
        self.write(&snapshot, &manifest)?;

        report.vectors = snapshot.len();
        tracing::info!(
            vectors = report.vectors,
            index = %self.persistence.index_path().display(),
            "Index built"
        );
        Ok(report)
    }

    /// Indexes the files that are not in the manifest yet, extending the existing snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::MissingSnapshot`] if there are new files but no snapshot to extend.
    pub async fn append(&self) -> Result<IngestReport> {
        let mut manifest = Manifest::load(&self.config.manifest_path())?;

        let new_files: Vec<PathBuf> = self
            .loader
            .scan(&self.config.input_dir)?
            .into_iter()
            .filter(|path| self.config.accepts(path))
            .filter(|path| {
                path.file_name()
                    .is_some_and(|name| !manifest.contains(&name.to_string_lossy()))
            })
            .collect();

        if new_files.is_empty() {
            tracing::info!("No new files to process");
            return Ok(IngestReport::noop());
        }

        let mut snapshot = self.persistence.load()?;
        let before = snapshot.len();
        let mut report = self.ingest(&new_files, &mut snapshot).await;

        for file in &report.recorded {
            manifest.insert(file.clone());
        }
        self.write(&snapshot, &manifest)?;

        report.vectors = snapshot.len();
        tracing::info!(
            files = new_files.len(),
            chunks = report.vectors - before,
            "Appended {} file(s) with {} new chunks",
            new_files.len(),
            report.vectors - before
        );
        Ok(report)
    }

    /// Replaces snapshot and manifest together; on failure the previous files stay in place.
    fn write(&self, snapshot: &Snapshot, manifest: &Manifest) -> Result<()> {
        let mut writes = self.persistence.stage(snapshot)?;
        writes.push(manifest.stage(&self.config.manifest_path())?);
        commit(writes)
    }

    async fn ingest(&self, files: &[PathBuf], snapshot: &mut Snapshot) -> IngestReport {
        let loaded = self.loader.load_paths(files);
        let chunks = self.chunker.split_pages(&loaded.pages);
        tracing::info!(chunks = chunks.len(), "Split into {} chunks", chunks.len());

        let mut report = IngestReport {
            chunks_total: chunks.len(),
            ..IngestReport::default()
        };

        // per loaded file: (chunks produced, chunks embedded)
        let mut tally: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for file in loaded.loaded() {
            tally.insert(file, (0, 0));
        }

        for chunk in &chunks {
            let entry = tally.entry(chunk.source_file.as_str()).or_default();
            entry.0 += 1;
            match self.embed_into(chunk, snapshot).await {
                Ok(()) => {
                    entry.1 += 1;
                    report.chunks_embedded += 1;
                }
                Err(err) => {
                    tracing::warn!(
                        file = %chunk.source_file,
                        position = chunk.position,
                        error = %err,
                        "Embedding failed"
                    );
                    report.failures.push(ChunkFailure {
                        source_file: chunk.source_file.clone(),
                        position: chunk.position,
                        reason: err.to_string(),
                    });
                }
            }
        }

        let recorded: BTreeSet<&str> = tally
            .iter()
            .filter(|(_, (produced, embedded))| *produced == 0 || *embedded > 0)
            .map(|(file, _)| *file)
            .collect();
        report.recorded = recorded.into_iter().map(ToString::to_string).collect();
        report.files = loaded.outcomes;
        report
    }

    async fn embed_into(&self, chunk: &Chunk, snapshot: &mut Snapshot) -> Result<()> {
        let vector = self
            .model
            .embed(&chunk.text)
            .await
            .map_err(RagError::Embedding)?;
        snapshot.push(&vector, chunk.text.clone())?;
        Ok(())
    }
}
