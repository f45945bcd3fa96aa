//! # sowkit-core
//!
//! `sowkit-core` hosts the no-std trait APIs that the rest of the workspace is written against.
//! The retrieval pipeline only ever talks to an [`EmbeddingModel`], and the generators only ever
//! talk to a [`LanguageModel`]; provider crates (such as `sowkit-openai`) implement both, and
//! tests substitute in-process mocks.
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   Pipeline      │───▶│  sowkit-core     │◀───│   Providers     │
//! │                 │    │                  │    │                 │
//! │ - ingestion     │    │ - EmbeddingModel │    │ - openai        │
//! │ - retrieval     │    │ - LanguageModel  │    │ - test mocks    │
//! │ - SOW drafting  │    │                  │    │                 │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sowkit_core::{LanguageModel, llm::{Message, Parameters, Request}};
//!
//! async fn ask(model: impl LanguageModel, question: &str) -> sowkit_core::Result {
//!     let request = Request::new([Message::user(question)])
//!         .with_parameters(Parameters::deterministic());
//!     Ok(model.respond(request).await?)
//! }
//! ```
//!
//! ## Modules
//!
//! - [`embedding`] – turn text into dense vectors.
//! - [`llm`] – messages, request builders and the completion trait.

#![no_std]
extern crate alloc;

/// Text embeddings.
pub mod embedding;
pub mod llm;

use alloc::string::String;

#[doc(inline)]
pub use embedding::EmbeddingModel;
#[doc(inline)]
pub use llm::LanguageModel;

/// Result type used throughout the workspace.
///
/// Type alias for [`anyhow::Result<T>`](anyhow::Result) with [`String`] as default success type.
pub type Result<T = String> = anyhow::Result<T>;

pub use anyhow::Error;
