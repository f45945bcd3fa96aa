//! Text chunking for RAG.
//!
//! A [`Chunker`] turns page text into overlapping character windows. Positions are assigned per
//! source file across all of its pages, so `(source_file, position)` identifies a chunk.

mod recursive;

pub use recursive::RecursiveChunker;

use std::collections::HashMap;

use crate::types::{Chunk, Page};

/// Trait for text chunking strategies.
pub trait Chunker: Send + Sync {
    /// Splits one text into chunk texts, in document order.
    fn split_text(&self, text: &str) -> Vec<String>;

    /// Returns the name of this chunking strategy.
    fn name(&self) -> &'static str;

    /// Splits pages into chunks, numbering them per source file.
    fn split_pages(&self, pages: &[Page]) -> Vec<Chunk> {
        let mut next_position: HashMap<&str, usize> = HashMap::new();
        let mut chunks = Vec::new();
        for page in pages {
            let position = next_position.entry(page.source_file.as_str()).or_default();
            for text in self.split_text(&page.text) {
                chunks.push(Chunk {
                    text,
                    source_file: page.source_file.clone(),
                    position: *position,
                });
                *position += 1;
            }
        }
        chunks
    }
}
