//! Query-time retrieval over a loaded snapshot.

use sowkit_core::EmbeddingModel;

use crate::config::RagConfig;
use crate::error::{RagError, Result};
use crate::persistence::{Persistence, RkyvPersistence, Snapshot};
use crate::types::SearchHit;

/// Embeds queries and looks up the nearest chunks.
///
/// The snapshot is loaded once and only read afterwards, so a `Retriever` can be shared behind an
/// `Arc` by concurrent request handlers.
#[derive(Debug)]
pub struct Retriever<M> {
    model: M,
    snapshot: Snapshot,
    top_k: usize,
}

impl<M: EmbeddingModel> Retriever<M> {
    /// Loads the snapshot from the configured output directory.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::MissingSnapshot`] if nothing has been built yet, or
    /// [`RagError::Misaligned`] if the snapshot is inconsistent.
    pub fn open(model: M, config: &RagConfig) -> Result<Self> {
        let snapshot = RkyvPersistence::from_config(config).load()?;
        tracing::info!(vectors = snapshot.len(), "Loaded index snapshot");
        Ok(Self::from_parts(model, snapshot, config.top_k))
    }

    /// Wraps an in-memory snapshot.
    #[must_use]
    pub const fn from_parts(model: M, snapshot: Snapshot, top_k: usize) -> Self {
        Self {
            model,
            snapshot,
            top_k,
        }
    }

    /// Result count used when callers do not pick one.
    #[must_use]
    pub const fn default_k(&self) -> usize {
        self.top_k
    }

    /// Number of indexed chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    /// Returns `true` if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Texts of the `k` chunks nearest to `query`, nearest first.
    ///
    /// Returns fewer than `k` texts when fewer are indexed.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Embedding`] if the query cannot be embedded and
    /// [`RagError::DimensionMismatch`] if its vector does not fit the index.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<String>> {
        Ok(self
            .retrieve_scored(query, k)
            .await?
            .into_iter()
            .map(|hit| hit.text)
            .collect())
    }

    /// Like [`retrieve`](Self::retrieve), keeping positions and distances.
    ///
    /// # Errors
    ///
    /// See [`retrieve`](Self::retrieve).
    pub async fn retrieve_scored(&self, query: &str, k: usize) -> Result<Vec<SearchHit>> {
        if k == 0 || self.snapshot.is_empty() {
            return Ok(Vec::new());
        }
        let vector = self.model.embed(query).await.map_err(RagError::Embedding)?;
        let neighbors = self.snapshot.index.search(&vector, k)?;

        let mut hits = Vec::with_capacity(neighbors.len());
        for neighbor in neighbors {
            let text = self
                .snapshot
                .store
                .get(neighbor.position)
                .ok_or(RagError::Misaligned {
                    vectors: self.snapshot.index.len(),
                    texts: self.snapshot.store.len(),
                })?;
            hits.push(SearchHit {
                position: neighbor.position,
                distance: neighbor.distance,
                text: text.to_string(),
            });
        }
        tracing::debug!(hits = hits.len(), "Retrieved context");
        Ok(hits)
    }
}
