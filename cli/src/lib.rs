//! Command-line support for sowkit.
//!
//! The `sowkit` binary wires the workspace together: OpenAI for embeddings and completions,
//! the RAG index on disk, DuckDuckGo for live search and the axum front-end.
//!
//! # Usage
//!
//! ```bash
//! OPENAI_API_KEY=xxx cargo run -p sowkit-cli -- build
//! OPENAI_API_KEY=xxx cargo run -p sowkit-cli -- serve
//! ```

mod settings;

pub use settings::{API_KEY_VAR, BASE_URL_VAR, DEFAULT_LOG, HOME_IP_VAR, LOG_VAR, Settings, log_filter};
