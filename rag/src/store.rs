//! Ordered chunk texts, addressed by index position.

/// Chunk texts aligned one-to-one with the vectors of a [`FlatIndex`](crate::FlatIndex).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkStore {
    texts: Vec<String>,
}

impl ChunkStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { texts: Vec::new() }
    }

    /// Appends a text and returns its position.
    pub fn push(&mut self, text: impl Into<String>) -> usize {
        self.texts.push(text.into());
        self.texts.len() - 1
    }

    /// The text at `position`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&str> {
        self.texts.get(position).map(String::as_str)
    }

    /// Number of texts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Returns `true` if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Iterates texts in position order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.texts.iter().map(String::as_str)
    }

    /// Consumes the store.
    #[must_use]
    pub fn into_texts(self) -> Vec<String> {
        self.texts
    }
}

impl From<Vec<String>> for ChunkStore {
    fn from(texts: Vec<String>) -> Self {
        Self { texts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_insertion_order() {
        let mut store = ChunkStore::new();
        assert_eq!(store.push("first"), 0);
        assert_eq!(store.push(String::from("second")), 1);
        assert_eq!(store.get(1), Some("second"));
        assert_eq!(store.get(2), None);
        assert_eq!(store.iter().collect::<Vec<_>>(), ["first", "second"]);
    }
}
