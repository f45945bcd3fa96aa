//! Document loading.
//!
//! [`DocumentLoader`] turns a directory of office documents into text [`Page`]s. Each file is
//! handled on its own: an unsupported extension or a broken file becomes a [`FileOutcome`] in
//! the returned [`LoadReport`] and never aborts the run.

mod docx;
mod html;
mod tabular;

use std::fs;
use std::path::{Path, PathBuf};

use sowkit_pdf_process::PdfProcessor;

use crate::config::RagConfig;
use crate::error::{RagError, Result};
use crate::types::Page;

/// Source formats with a dedicated extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Portable Document Format, one page per PDF page.
    Pdf,
    /// Office Open XML word processing document.
    Docx,
    /// Legacy Word document; read as DOCX when it is actually a zip container.
    Doc,
    /// Comma-separated values, one page per record.
    Csv,
    /// HTML page.
    Html,
    /// Plain text or Markdown.
    Text,
}

impl DocumentFormat {
    /// Detects the format from a file extension (case-insensitive).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "doc" => Some(Self::Doc),
            "csv" => Some(Self::Csv),
            "html" | "htm" => Some(Self::Html),
            "txt" | "md" => Some(Self::Text),
            _ => None,
        }
    }

    /// Detects the format of `path`.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// What happened to one file during loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Text was extracted.
    Loaded {
        /// Bare file name.
        file: String,
        /// Number of pages produced.
        pages: usize,
    },
    /// The extension is not allow-listed or has no extractor.
    Unsupported {
        /// Bare file name.
        file: String,
    },
    /// Extraction failed.
    Failed {
        /// Bare file name.
        file: String,
        /// Human-readable cause.
        reason: String,
    },
}

impl FileOutcome {
    /// The file this outcome is about.
    #[must_use]
    pub fn file(&self) -> &str {
        match self {
            Self::Loaded { file, .. } | Self::Unsupported { file } | Self::Failed { file, .. } => {
                file
            }
        }
    }

    /// Whether text was extracted.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// Pages and per-file outcomes of a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Pages of every loaded file, in file order then page order.
    pub pages: Vec<Page>,
    /// One outcome per input path.
    pub outcomes: Vec<FileOutcome>,
}

impl LoadReport {
    /// Files that loaded.
    pub fn loaded(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| o.is_loaded())
            .map(FileOutcome::file)
    }

    /// Number of files that failed to load.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Failed { .. }))
            .count()
    }
}

/// Loads supported documents from a directory.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    config: RagConfig,
}

impl DocumentLoader {
    /// Creates a loader honouring the configured extension allow-list.
    #[must_use]
    pub fn new(config: &RagConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Whether `path` is allow-listed and has an extractor.
    #[must_use]
    pub fn supports(&self, path: &Path) -> bool {
        self.config.accepts(path) && DocumentFormat::from_path(path).is_some()
    }

    /// Regular files directly inside `dir`, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    pub fn scan(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Scans `dir` and loads every file in it.
    ///
    /// # Errors
    ///
    /// Returns an error only if the directory cannot be listed.
    pub fn load_dir(&self, dir: &Path) -> Result<LoadReport> {
        let files = self.scan(dir)?;
        Ok(self.load_paths(&files))
    }

    /// Loads the given files, recording one outcome each.
    #[must_use]
    pub fn load_paths(&self, paths: &[PathBuf]) -> LoadReport {
        let mut report = LoadReport::default();
        for path in paths {
            let file = file_name(path);
            if !self.supports(path) {
                tracing::warn!(file = %file, "Skipping unsupported type");
                report.outcomes.push(FileOutcome::Unsupported { file });
                continue;
            }
            match self.load_file(path) {
                Ok(pages) => {
                    tracing::info!(file = %file, pages = pages.len(), "Loaded {file}: {} pages", pages.len());
                    report.outcomes.push(FileOutcome::Loaded {
                        file,
                        pages: pages.len(),
                    });
                    report.pages.extend(pages);
                }
                Err(err) => {
                    tracing::warn!(file = %file, error = %err, "Failed to load {file}");
                    report.outcomes.push(FileOutcome::Failed {
                        file,
                        reason: err.to_string(),
                    });
                }
            }
        }
        report
    }

    /// Extracts the pages of a single file.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Load`] for unknown formats and format-specific errors otherwise.
    pub fn load_file(&self, path: &Path) -> Result<Vec<Page>> {
        let file = file_name(path);
        let format = DocumentFormat::from_path(path).ok_or_else(|| RagError::Load {
            path: path.to_path_buf(),
            reason: "unsupported file type".into(),
        })?;

        let texts = match format {
            DocumentFormat::Pdf => PdfProcessor::from_path(path)
                .pages()?
                .into_iter()
                .map(|page| page.text)
                .collect(),
            DocumentFormat::Docx | DocumentFormat::Doc => vec![docx::extract(path)?],
            DocumentFormat::Csv => tabular::extract(path)?,
            DocumentFormat::Html => vec![html::extract(&read_utf8(path)?)?],
            DocumentFormat::Text => vec![read_utf8(path)?],
        };

        Ok(texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Page::new(file.clone(), i + 1, text))
            .collect())
    }
}

fn read_utf8(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|e| RagError::Load {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
