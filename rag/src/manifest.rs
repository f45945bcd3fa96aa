//! Set of file names that have already been ingested.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::{RagError, Result};
use crate::persistence::{StagedWrite, commit};

/// Ingested file names, persisted as a sorted JSON array.
///
/// The manifest only gates re-ingestion; it is not a record of what the index contains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    files: BTreeSet<String>,
}

impl Manifest {
    /// Creates an empty manifest.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files: BTreeSet::new(),
        }
    }

    /// Reads a manifest; a missing file is an empty manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a JSON string array.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let bytes = fs::read(path).map_err(|source| RagError::Persistence {
            path: path.to_path_buf(),
            source,
        })?;
        let files: BTreeSet<String> = serde_json::from_slice(&bytes)
            .map_err(|e| RagError::Serialization(format!("{}: {e}", path.display())))?;
        Ok(Self { files })
    }

    /// Serializes the manifest as a pretty-printed, sorted JSON array into a staged file.
    ///
    /// # Errors
    ///
    /// Returns an error if the staged file cannot be written.
    pub fn stage(&self, path: &Path) -> Result<StagedWrite> {
        let json = serde_json::to_string_pretty(&self.files)
            .map_err(|e| RagError::Serialization(e.to_string()))?;
        StagedWrite::new(path, json.as_bytes())
    }

    /// Writes the manifest as a pretty-printed, sorted JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        commit(vec![self.stage(path)?])
    }

    /// Whether `file` has been ingested.
    #[must_use]
    pub fn contains(&self, file: &str) -> bool {
        self.files.contains(file)
    }

    /// Records `file`; returns `false` if it was already present.
    pub fn insert(&mut self, file: impl Into<String>) -> bool {
        self.files.insert(file.into())
    }

    /// Number of recorded files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Recorded files in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Manifest {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let manifest = Manifest::load(&dir.path().join("processed_files.json")).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn saves_sorted_pretty_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("processed_files.json");
        let manifest: Manifest = ["zeta.pdf", "alpha.docx"].into_iter().collect();

        manifest.save(&path).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "[\n  \"alpha.docx\",\n  \"zeta.pdf\"\n]");

        let loaded = Manifest::load(&path).unwrap();
        assert_eq!(loaded, manifest);
        assert!(loaded.contains("zeta.pdf"));
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("processed_files.json");
        fs::write(&path, "{\"not\": \"a list\"}").unwrap();
        assert!(matches!(
            Manifest::load(&path),
            Err(RagError::Serialization(_))
        ));
    }
}
