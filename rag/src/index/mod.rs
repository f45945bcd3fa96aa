//! Vector index for RAG.
//!
//! [`FlatIndex`] is an exact nearest-neighbour index: every search scans all vectors. Positions
//! returned by a search are insertion positions, which is how the chunk store is addressed.

mod flat;

pub use flat::{FlatIndex, Neighbor};
