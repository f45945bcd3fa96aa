//! Retrieval over an office-document library.
//!
//! This crate covers the ingestion and lookup halves of the pipeline:
//!
//! - [`DocumentLoader`] – extract text pages from PDF, DOCX, CSV, HTML, TXT and MD files.
//! - [`RecursiveChunker`] – split pages into overlapping, boundary-aware windows.
//! - [`Ingestor`] – embed chunks and persist a flat index, its chunk store and a manifest
//!   ([`Ingestor::build`] from scratch, [`Ingestor::append`] for new files only).
//! - [`Retriever`] – embed a query and return the nearest chunk texts.
//!
//! Any [`EmbeddingModel`](sowkit_core::EmbeddingModel) can drive ingestion and retrieval. The
//! index is exact: every query scans every vector in parallel, which is plenty for a library
//! of a few hundred thousand chunks.
//!
//! # Example
//!
//! ```rust,ignore
//! use sowkit_rag::{Ingestor, RagConfig, Retriever};
//!
//! let config = RagConfig::builder().input_dir("input").output_dir("output").build()?;
//! Ingestor::new(&embedder, config.clone())?.build().await?;
//!
//! let retriever = Retriever::open(&embedder, &config)?;
//! for text in retriever.retrieve("How do we run discovery?", 5).await? {
//!     println!("{text}");
//! }
//! ```

pub mod chunking;
pub mod config;
pub mod error;
pub mod index;
pub mod ingest;
pub mod loader;
pub mod manifest;
pub mod persistence;
pub mod retriever;
pub mod store;
pub mod types;

pub use chunking::{Chunker, RecursiveChunker};
pub use config::{RagConfig, RagConfigBuilder};
pub use error::{RagError, Result};
pub use index::{FlatIndex, Neighbor};
pub use ingest::{ChunkFailure, IngestReport, Ingestor};
pub use loader::{DocumentFormat, DocumentLoader, FileOutcome, LoadReport};
pub use manifest::Manifest;
pub use persistence::{Persistence, RkyvPersistence, Snapshot};
pub use retriever::Retriever;
pub use store::ChunkStore;
pub use types::{Chunk, Page, SearchHit};
