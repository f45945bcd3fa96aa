//! Model & endpoint constants
//!
//! Only stable, non-snapshot model names are listed. Custom strings are always accepted.

/// Default `OpenAI` API base URL (chat, embeddings, etc.).
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Flagship multimodal chat model.
pub const GPT4O: &str = "gpt-4o";

/// Smaller and cheaper `gpt-4o` variant.
pub const GPT4O_MINI: &str = "gpt-4o-mini";

/// GPT-4 Turbo, used for long-form drafting.
pub const GPT4_TURBO: &str = "gpt-4-turbo";

/// Large embedding model (3072 dimensions).
pub const EMBEDDING_LARGE: &str = "text-embedding-3-large";

/// Small embedding model (1536 dimensions).
pub const EMBEDDING_SMALL: &str = "text-embedding-3-small";

/// Legacy ada embedding model (1536 dimensions).
pub const EMBEDDING_ADA002: &str = "text-embedding-ada-002";
