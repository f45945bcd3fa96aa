//! Boundary-aware chunking with exact overlap.

use crate::config::RagConfig;
use crate::error::{RagError, Result};

use super::Chunker;

/// Boundary classes, strongest first. A chunk ends right after a separator.
const LEVELS: [&[&str]; 4] = [&["\n\n"], &["\n"], &[". ", "! ", "? "], &[" ", "\t"]];

/// Splits text into windows of at most `chunk_size` characters that overlap by exactly
/// `overlap` characters.
///
/// Each window ends at the furthest paragraph break it can reach, else the furthest line break,
/// else the furthest sentence end, else the furthest space, else at the size limit. The next
/// window starts `overlap` characters before that end, so the windows tile the text with no gaps.
/// An end is never placed inside the overlap carried over from the previous window, so no
/// character lands in more than two chunks as long as `chunk_size >= 2 * overlap`.
///
/// # Example
///
/// ```rust
/// use sowkit_rag::chunking::{Chunker, RecursiveChunker};
///
/// let chunker = RecursiveChunker::new(40, 10).unwrap();
/// let chunks = chunker.split_text("First paragraph here.\n\nSecond paragraph, a bit longer than the first.");
/// assert!(chunks.iter().all(|c| c.chars().count() <= 40));
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    chunk_size: usize,
    overlap: usize,
}

impl RecursiveChunker {
    /// Creates a new chunker.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidConfig`] if `chunk_size` is zero or `overlap >= chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 || overlap >= chunk_size {
            return Err(RagError::InvalidConfig(format!(
                "overlap ({overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Creates a chunker from the configured size and overlap.
    ///
    /// # Errors
    ///
    /// See [`RecursiveChunker::new`].
    pub fn from_config(config: &RagConfig) -> Result<Self> {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    /// Maximum chunk length in characters.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Characters shared by adjacent chunks.
    #[must_use]
    pub const fn overlap(&self) -> usize {
        self.overlap
    }

    fn boundary(&self, chars: &[char], start: usize, min_end: usize) -> usize {
        let max_end = start + self.chunk_size;
        if min_end >= max_end {
            return max_end;
        }
        for separators in LEVELS {
            let found = (min_end + 1..=max_end)
                .rev()
                .find(|&end| separators.iter().any(|sep| ends_with(chars, end, sep)));
            if let Some(end) = found {
                return end;
            }
        }
        max_end
    }
}

impl Default for RecursiveChunker {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            overlap: 100,
        }
    }
}

impl Chunker for RecursiveChunker {
    fn split_text(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let mut chunks = Vec::new();
        let mut start = 0;

        while chars.len() - start > self.chunk_size {
            let carried = if start == 0 { 0 } else { self.overlap };
            let end = self.boundary(&chars, start, start + self.overlap + carried);
            chunks.push(chars[start..end].iter().collect());
            start = end - self.overlap;
        }
        chunks.push(chars[start..].iter().collect());
        chunks
    }

    fn name(&self) -> &'static str {
        "recursive"
    }
}

fn ends_with(chars: &[char], end: usize, separator: &str) -> bool {
    let len = separator.chars().count();
    end >= len && chars[end - len..end].iter().copied().eq(separator.chars())
}
