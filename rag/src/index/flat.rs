//! Exact squared-L2 index over a contiguous vector buffer.

use ordered_float::OrderedFloat;
use rayon::prelude::*;

use crate::error::{RagError, Result};

/// A search result: insertion position and squared Euclidean distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Insertion position of the vector.
    pub position: usize,
    /// Squared Euclidean distance to the query.
    pub distance: f32,
}

/// Flat exact index.
///
/// Vectors are stored back to back in one buffer. The dimension is fixed by the first vector
/// added to an index created with [`FlatIndex::empty`], or up front with [`FlatIndex::new`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatIndex {
    dimension: usize,
    data: Vec<f32>,
}

impl FlatIndex {
    /// An index whose dimension is fixed by the first insert.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            dimension: 0,
            data: Vec::new(),
        }
    }

    /// An empty index of a known dimension.
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self {
            dimension,
            data: Vec::new(),
        }
    }

    /// Rebuilds an index from a persisted buffer.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Serialization`] if the buffer is not a whole number of vectors.
    pub fn from_raw(dimension: usize, data: Vec<f32>) -> Result<Self> {
        if (dimension == 0 && !data.is_empty()) || (dimension != 0 && data.len() % dimension != 0) {
            return Err(RagError::Serialization(format!(
                "vector buffer of {} floats does not divide into dimension {dimension}",
                data.len()
            )));
        }
        Ok(Self { dimension, data })
    }

    /// Vector dimension, or `0` while still unfixed.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.data.len() / self.dimension
        }
    }

    /// Returns `true` if the index holds no vectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The contiguous vector buffer.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The vector stored at `position`.
    #[must_use]
    pub fn vector(&self, position: usize) -> Option<&[f32]> {
        if position >= self.len() {
            return None;
        }
        let start = position * self.dimension;
        Some(&self.data[start..start + self.dimension])
    }

    /// Appends a vector and returns its position.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`] if the vector length differs from the index
    /// dimension, or if it is empty.
    pub fn add(&mut self, vector: &[f32]) -> Result<usize> {
        if self.dimension == 0 && self.data.is_empty() && !vector.is_empty() {
            self.dimension = vector.len();
        }
        if vector.len() != self.dimension || vector.is_empty() {
            return Err(RagError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        let position = self.len();
        self.data.extend_from_slice(vector);
        Ok(position)
    }

    /// Returns the `k` nearest vectors, closest first.
    ///
    /// Returns `min(k, len)` neighbours; ties keep insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`] if the query length differs from the index
    /// dimension.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }
        if query.len() != self.dimension {
            return Err(RagError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut neighbors: Vec<Neighbor> = self
            .data
            .par_chunks_exact(self.dimension)
            .enumerate()
            .map(|(position, vector)| Neighbor {
                position,
                distance: squared_l2(vector, query),
            })
            .collect();

        neighbors.sort_by_key(|n| OrderedFloat(n.distance));
        neighbors.truncate(k);
        Ok(neighbors)
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(vectors: &[[f32; 2]]) -> FlatIndex {
        let mut index = FlatIndex::empty();
        for v in vectors {
            index.add(v).unwrap();
        }
        index
    }

    #[test]
    fn first_vector_fixes_dimension() {
        let mut index = FlatIndex::empty();
        assert_eq!(index.add(&[1.0, 2.0, 3.0]).unwrap(), 0);
        assert_eq!(index.dimension(), 3);
        assert!(matches!(
            index.add(&[1.0]),
            Err(RagError::DimensionMismatch {
                expected: 3,
                actual: 1
            })
        ));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn nearest_first() {
        let index = index_of(&[[0.0, 0.0], [5.0, 5.0], [1.0, 0.0]]);
        let hits = index.search(&[0.9, 0.0], 2).unwrap();
        let positions: Vec<usize> = hits.iter().map(|n| n.position).collect();
        assert_eq!(positions, [2, 0]);
        assert!((hits[0].distance - 0.01).abs() < 1e-6);
    }

    #[test]
    fn k_larger_than_index_returns_everything() {
        let index = index_of(&[[0.0, 0.0], [1.0, 1.0]]);
        assert_eq!(index.search(&[0.0, 0.0], 5).unwrap().len(), 2);
    }

    #[test]
    fn zero_k_and_empty_index_return_nothing() {
        let index = index_of(&[[0.0, 0.0]]);
        assert!(index.search(&[0.0, 0.0], 0).unwrap().is_empty());
        assert!(FlatIndex::new(2).search(&[0.0, 0.0], 3).unwrap().is_empty());
    }

    #[test]
    fn ties_keep_insertion_order() {
        let index = index_of(&[[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0]]);
        let positions: Vec<usize> = index
            .search(&[0.0, 0.0], 3)
            .unwrap()
            .iter()
            .map(|n| n.position)
            .collect();
        assert_eq!(positions, [0, 1, 2]);
    }

    #[test]
    fn wrong_query_dimension_is_an_error() {
        let index = index_of(&[[0.0, 0.0]]);
        assert!(matches!(
            index.search(&[0.0, 0.0, 0.0], 1),
            Err(RagError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn from_raw_checks_buffer_shape() {
        let index = FlatIndex::from_raw(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.vector(1), Some(&[3.0, 4.0][..]));
        assert!(index.vector(2).is_none());
        assert!(FlatIndex::from_raw(3, vec![1.0, 2.0]).is_err());
    }
}
