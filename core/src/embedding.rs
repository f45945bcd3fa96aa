//! # Embedding Module
//!
//! Embeddings are dense vector representations of text. Texts with similar meaning map to
//! vectors that sit close together, which is what the retrieval pipeline relies on: every
//! chunk of the document library is embedded once at ingestion time, and every question is
//! embedded at query time and compared against them.
//!
//! The [`EmbeddingModel`] trait abstracts over the provider so ingestion and retrieval can be
//! exercised with deterministic in-process models.
//!
//! ```rust
//! use sowkit_core::EmbeddingModel;
//!
//! async fn example<T: EmbeddingModel>(model: &T) -> sowkit_core::Result<()> {
//!     let dim = model.dim();
//!     let embedding = model.embed("Pipeline review cadence").await?;
//!     assert_eq!(embedding.len(), dim);
//!     Ok(())
//! }
//! ```

use alloc::vec::Vec;
use core::future::Future;

/// A type alias for an embedding vector of 32-bit floats.
pub type Embedding = Vec<f32>;

/// Converts text to vector representations.
///
/// # Implementation Requirements
///
/// - The [`embed`](EmbeddingModel::embed) method must return vectors with length equal to [`dim`](EmbeddingModel::dim)
/// - The same model must be used for indexing and querying; vectors from different models are not comparable
///
/// # Example
///
/// ```rust
/// use sowkit_core::EmbeddingModel;
///
/// struct Constant;
///
/// impl EmbeddingModel for Constant {
///     fn dim(&self) -> usize {
///         8
///     }
///
///     async fn embed(&self, _text: &str) -> sowkit_core::Result<Vec<f32>> {
///         Ok(vec![0.0; self.dim()])
///     }
/// }
/// ```
pub trait EmbeddingModel: Send + Sync {
    /// Returns the embedding vector dimension.
    ///
    /// This value determines the length of vectors returned by [`embed`](EmbeddingModel::embed).
    /// `OpenAI`'s `text-embedding-3-large` produces 3072 dimensions.
    fn dim(&self) -> usize;

    /// Converts text to an embedding vector.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying provider fails (network, quota, malformed response).
    fn embed(&self, text: &str) -> impl Future<Output = crate::Result<Embedding>> + Send;
}

impl<T: EmbeddingModel> EmbeddingModel for &T {
    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn embed(&self, text: &str) -> impl Future<Output = crate::Result<Embedding>> + Send {
        (**self).embed(text)
    }
}

impl<T: EmbeddingModel> EmbeddingModel for alloc::sync::Arc<T> {
    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn embed(&self, text: &str) -> impl Future<Output = crate::Result<Embedding>> + Send {
        (**self).embed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::sync::Arc;
    use alloc::vec;
    use core::sync::atomic::{AtomicUsize, Ordering};

    struct MockEmbeddingModel {
        dimension: usize,
        calls: AtomicUsize,
    }

    impl MockEmbeddingModel {
        const fn new(dimension: usize) -> Self {
            Self {
                dimension,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl EmbeddingModel for MockEmbeddingModel {
        fn dim(&self) -> usize {
            self.dimension
        }

        #[allow(clippy::cast_precision_loss)]
        async fn embed(&self, text: &str) -> crate::Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut embedding = vec![0.0; self.dimension];
            for (i, value) in embedding.iter_mut().enumerate() {
                *value = (text.len() + i) as f32 * 0.01;
            }
            Ok(embedding)
        }
    }

    #[tokio::test]
    async fn embedding_matches_dimension() {
        let model = MockEmbeddingModel::new(4);
        let embedding = model.embed("test").await.unwrap();

        assert_eq!(embedding.len(), 4);
        assert!((embedding[0] - 0.04).abs() < f32::EPSILON);
        assert!((embedding[3] - 0.07).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn reference_forwards_to_model() {
        let model = MockEmbeddingModel::new(3);
        let by_ref = &model;

        assert_eq!(EmbeddingModel::dim(&by_ref), 3);
        by_ref.embed("a").await.unwrap();
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn arc_forwards_to_model() {
        let model = Arc::new(MockEmbeddingModel::new(2));
        let shared = Arc::clone(&model);

        let embedding = shared.embed("ab").await.unwrap();
        assert_eq!(embedding.len(), 2);
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }
}
