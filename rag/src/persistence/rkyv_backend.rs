//! rkyv-based binary persistence.

use rkyv::rancor::Error as RkyvError;
use rkyv::util::AlignedVec;
use rkyv::{from_bytes, to_bytes};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::RagConfig;
use crate::error::{RagError, Result};
use crate::index::FlatIndex;
use crate::store::ChunkStore;

use super::{Persistence, Snapshot, StagedWrite};

/// Archived form of the vector index.
#[derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
#[rkyv(derive(Debug))]
struct IndexArchive {
    dimension: u64,
    vectors: Vec<f32>,
}

/// Archived form of the chunk store.
#[derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
#[rkyv(derive(Debug))]
struct ChunksArchive {
    texts: Vec<String>,
}

/// Binary persistence using rkyv, one file for the index and one for the chunk texts.
///
/// # Example
///
/// ```rust,no_run
/// use sowkit_rag::RagConfig;
/// use sowkit_rag::persistence::{Persistence, RkyvPersistence};
///
/// let persistence = RkyvPersistence::from_config(&RagConfig::default());
/// let snapshot = persistence.load()?;
/// println!("{} chunks", snapshot.len());
/// # Ok::<(), sowkit_rag::RagError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RkyvPersistence {
    index_path: PathBuf,
    chunks_path: PathBuf,
}

impl RkyvPersistence {
    /// Creates a backend writing to the two given files.
    #[must_use]
    pub fn new(index_path: impl Into<PathBuf>, chunks_path: impl Into<PathBuf>) -> Self {
        Self {
            index_path: index_path.into(),
            chunks_path: chunks_path.into(),
        }
    }

    /// Creates a backend for the configured output directory.
    #[must_use]
    pub fn from_config(config: &RagConfig) -> Self {
        Self::new(config.index_path(), config.chunks_path())
    }

    /// Path of the index file.
    #[must_use]
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Path of the chunk store file.
    #[must_use]
    pub fn chunks_path(&self) -> &Path {
        &self.chunks_path
    }
}

impl Persistence for RkyvPersistence {
    fn stage(&self, snapshot: &Snapshot) -> Result<Vec<StagedWrite>> {
        snapshot.check_alignment()?;

        let index = IndexArchive {
            dimension: snapshot.index.dimension() as u64,
            vectors: snapshot.index.as_slice().to_vec(),
        };
        let chunks = ChunksArchive {
            texts: snapshot.store.iter().map(ToString::to_string).collect(),
        };

        let index_bytes =
            to_bytes::<RkyvError>(&index).map_err(|e| RagError::Serialization(e.to_string()))?;
        let chunk_bytes =
            to_bytes::<RkyvError>(&chunks).map_err(|e| RagError::Serialization(e.to_string()))?;

        Ok(vec![
            StagedWrite::new(&self.index_path, &index_bytes)?,
            StagedWrite::new(&self.chunks_path, &chunk_bytes)?,
        ])
    }

    fn load(&self) -> Result<Snapshot> {
        for path in [&self.index_path, &self.chunks_path] {
            if !path.exists() {
                return Err(RagError::MissingSnapshot { path: path.clone() });
            }
        }

        let index_bytes = read_aligned(&self.index_path)?;
        let index = from_bytes::<IndexArchive, RkyvError>(&index_bytes)
            .map_err(|e| RagError::Serialization(e.to_string()))?;
        let chunk_bytes = read_aligned(&self.chunks_path)?;
        let chunks = from_bytes::<ChunksArchive, RkyvError>(&chunk_bytes)
            .map_err(|e| RagError::Serialization(e.to_string()))?;

        let dimension = usize::try_from(index.dimension)
            .map_err(|e| RagError::Serialization(e.to_string()))?;
        let index = FlatIndex::from_raw(dimension, index.vectors)?;
        Snapshot::new(index, ChunkStore::from(chunks.texts))
    }

    fn exists(&self) -> bool {
        self.index_path.exists() && self.chunks_path.exists()
    }
}

/// Reads a file into a buffer aligned for archived access.
fn read_aligned(path: &Path) -> Result<AlignedVec> {
    let bytes = fs::read(path).map_err(|source| RagError::Persistence {
        path: path.to_path_buf(),
        source,
    })?;
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(&bytes);
    Ok(aligned)
}
