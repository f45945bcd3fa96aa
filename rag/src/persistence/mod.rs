//! Snapshot persistence for the vector index and chunk store.
//!
//! This module provides the [`Persistence`] trait and the rkyv-backed implementation. Every
//! load and every save checks that the index and the chunk store are still aligned. Saves go
//! through [`StagedWrite`] so a snapshot is replaced as a whole or not at all.

mod rkyv_backend;
mod staged;

pub use rkyv_backend::RkyvPersistence;
pub use staged::{StagedWrite, commit};

use crate::error::{RagError, Result};
use crate::index::FlatIndex;
use crate::store::ChunkStore;

/// The in-memory form of a persisted snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Embedded vectors.
    pub index: FlatIndex,
    /// Texts aligned with `index`.
    pub store: ChunkStore,
}

impl Snapshot {
    /// Pairs an index with its chunk store, checking alignment.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Misaligned`] if the counts differ.
    pub fn new(index: FlatIndex, store: ChunkStore) -> Result<Self> {
        let snapshot = Self { index, store };
        snapshot.check_alignment()?;
        Ok(snapshot)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the snapshot holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Adds one embedded chunk to both halves.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`] if the vector does not fit the index; the snapshot
    /// is left unchanged in that case.
    pub fn push(&mut self, vector: &[f32], text: impl Into<String>) -> Result<usize> {
        let position = self.index.add(vector)?;
        self.store.push(text);
        Ok(position)
    }

    /// Fails unless vector count equals text count.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Misaligned`] if the counts differ.
    pub fn check_alignment(&self) -> Result<()> {
        let (vectors, texts) = (self.index.len(), self.store.len());
        if vectors == texts {
            Ok(())
        } else {
            Err(RagError::Misaligned { vectors, texts })
        }
    }
}

/// Trait for persistence backends.
pub trait Persistence: Send + Sync {
    /// Serializes the snapshot into staged files, ready for [`commit`].
    ///
    /// Nothing visible changes until the returned writes are committed.
    fn stage(&self, snapshot: &Snapshot) -> Result<Vec<StagedWrite>>;

    /// Writes the full snapshot, replacing any previous one.
    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        commit(self.stage(snapshot)?)
    }

    /// Loads the full snapshot.
    ///
    /// Returns [`RagError::MissingSnapshot`] if nothing has been saved yet.
    fn load(&self) -> Result<Snapshot>;

    /// Whether a snapshot has been saved.
    fn exists(&self) -> bool;
}
