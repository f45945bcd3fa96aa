//! `OpenAI` integration for sowkit, built on `reqwest` and the shared `sowkit-core` traits.
//!
//! One [`OpenAI`] value serves both roles the pipeline needs: it embeds chunks and questions via
//! `/embeddings` and answers prompts via the non-streaming `/chat/completions` endpoint.
//!
//! ```no_run
//! use sowkit_core::{EmbeddingModel, LanguageModel, llm::{Parameters, oneshot}};
//! use sowkit_openai::{GPT4_TURBO, OpenAI};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let client = OpenAI::new(std::env::var("OPENAI_API_KEY")?);
//! let vector = client.embed("quarterly pipeline review").await?;
//! assert_eq!(vector.len(), client.dim());
//!
//! let drafter = client.with_model(GPT4_TURBO);
//! let reply = drafter
//!     .respond(oneshot("You are concise.", "Define RevOps.").with_parameters(Parameters::deterministic()))
//!     .await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

mod client;
mod constant;
mod embedding;
mod error;
mod request;
mod response;

pub use client::{Builder, OpenAI};
pub use constant::*;
pub use error::OpenAIError;
