#![no_std]
//! # sowkit
//!
//! Façade crate that re-exports everything from [`sowkit_core`] plus, behind cargo features, the
//! crates that make up the drafting pipeline. Pull this crate into a binary to ingest an office
//! document library, retrieve from it, and draft Statements of Work with any provider that
//! implements the core traits.
//!
//! ## What's inside?
//!
//! - [`LanguageModel`](sowkit_core::llm::LanguageModel) and
//!   [`EmbeddingModel`](sowkit_core::embedding::EmbeddingModel), the provider seams.
//! - `openai` – an OpenAI-compatible provider for both traits.
//! - `rag` – document loading, chunking, the flat vector index, snapshots and retrieval.
//! - `sow` – direct Q&A and structured SOW drafting on top of retrieval.
//! - `websearch`, `pdf-process`, `server` – search fallback, PDF in/out, and the web front-end.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sowkit::{openai::OpenAI, rag::{RagConfig, Retriever}, sow::Answerer};
//!
//! async fn ask(api_key: &str, question: &str) -> sowkit::Result<String> {
//!     let model = OpenAI::new(api_key);
//!     let retriever = Retriever::open(model.clone(), &RagConfig::default())?;
//!     Answerer::new(retriever, model).answer(question).await
//! }
//! ```

pub use sowkit_core::*;

#[cfg(feature = "openai")]
pub use sowkit_openai as openai;
#[cfg(feature = "pdf-process")]
pub use sowkit_pdf_process as pdf_process;
#[cfg(feature = "rag")]
pub use sowkit_rag as rag;
#[cfg(feature = "server")]
pub use sowkit_server as server;
#[cfg(feature = "sow")]
pub use sowkit_sow as sow;
#[cfg(feature = "websearch")]
pub use sowkit_websearch as websearch;
