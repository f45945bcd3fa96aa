//! All-or-nothing replacement of output files.
//!
//! Each file is first written in full to a temporary file beside its target. [`commit`] then
//! moves the staged files into place one after another; if any move fails, the files already
//! replaced are restored from their backups, so the output directory keeps its previous state.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{RagError, Result};

fn persistence_error(path: &Path) -> impl FnOnce(std::io::Error) -> RagError + '_ {
    move |source| RagError::Persistence {
        path: path.to_path_buf(),
        source,
    }
}

/// A fully written file waiting to replace `target`.
#[derive(Debug)]
pub struct StagedWrite {
    file: NamedTempFile,
    target: PathBuf,
}

impl StagedWrite {
    /// Writes `bytes` to a temporary file in the target's directory.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Persistence`] if the directory or the temporary file cannot be
    /// written.
    pub fn new(target: impl Into<PathBuf>, bytes: &[u8]) -> Result<Self> {
        let target = target.into();
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(persistence_error(&dir))?;

        let mut file = NamedTempFile::new_in(&dir).map_err(persistence_error(&target))?;
        file.write_all(bytes).map_err(persistence_error(&target))?;
        file.as_file()
            .sync_all()
            .map_err(persistence_error(&target))?;
        Ok(Self { file, target })
    }

    /// The file this write replaces.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    fn apply(self) -> Result<Applied> {
        let Self { file, target } = self;

        let backup = if target.is_file() {
            let backup = backup_path(&target);
            fs::rename(&target, &backup).map_err(persistence_error(&target))?;
            Some(backup)
        } else {
            None
        };

        if let Err(e) = file.persist(&target) {
            if let Some(backup) = &backup {
                restore(backup, &target);
            }
            return Err(RagError::Persistence {
                path: target,
                source: e.error,
            });
        }
        Ok(Applied { target, backup })
    }
}

/// A replaced target and where its previous contents went.
struct Applied {
    target: PathBuf,
    backup: Option<PathBuf>,
}

impl Applied {
    fn roll_back(self) {
        match &self.backup {
            Some(backup) => restore(backup, &self.target),
            None => {
                if let Err(e) = fs::remove_file(&self.target) {
                    tracing::warn!(path = %self.target.display(), error = %e, "Failed to roll back");
                }
            }
        }
    }

    fn finish(self) {
        let Some(backup) = self.backup else {
            return;
        };
        if let Err(e) = fs::remove_file(&backup) {
            tracing::warn!(path = %backup.display(), error = %e, "Failed to remove backup");
        }
    }
}

fn backup_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map_or_else(OsString::new, ToOwned::to_owned);
    name.push(".bak");
    target.with_file_name(name)
}

fn restore(backup: &Path, target: &Path) {
    if let Err(e) = fs::rename(backup, target) {
        tracing::error!(
            path = %target.display(),
            backup = %backup.display(),
            error = %e,
            "Failed to restore previous file"
        );
    }
}

/// Moves every staged file into place, or none of them.
///
/// # Errors
///
/// Returns the first [`RagError::Persistence`] met; targets replaced before it are restored.
pub fn commit(writes: Vec<StagedWrite>) -> Result<()> {
    let mut applied = Vec::with_capacity(writes.len());
    for write in writes {
        match write.apply() {
            Ok(done) => applied.push(done),
            Err(e) => {
                for done in applied.into_iter().rev() {
                    done.roll_back();
                }
                return Err(e);
            }
        }
    }
    for done in applied {
        done.finish();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn commit_replaces_every_target() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.json");
        fs::write(&a, "old a").unwrap();

        let writes = vec![
            StagedWrite::new(&a, b"new a").unwrap(),
            StagedWrite::new(&b, b"new b").unwrap(),
        ];
        commit(writes).unwrap();

        assert_eq!(fs::read_to_string(&a).unwrap(), "new a");
        assert_eq!(fs::read_to_string(&b).unwrap(), "new b");
        assert_eq!(names(dir.path()), ["a.bin", "b.json"]);
    }

    #[test]
    fn failed_commit_restores_earlier_targets() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let fresh = dir.path().join("fresh.bin");
        let blocked = dir.path().join("blocked.json");
        fs::write(&a, "old a").unwrap();
        fs::create_dir(&blocked).unwrap();

        let writes = vec![
            StagedWrite::new(&a, b"new a").unwrap(),
            StagedWrite::new(&fresh, b"new file").unwrap(),
            StagedWrite::new(&blocked, b"[]").unwrap(),
        ];
        assert!(matches!(
            commit(writes),
            Err(RagError::Persistence { .. })
        ));

        assert_eq!(fs::read_to_string(&a).unwrap(), "old a");
        assert!(!fresh.exists());
        assert_eq!(names(dir.path()), ["a.bin", "blocked.json"]);
    }
}
