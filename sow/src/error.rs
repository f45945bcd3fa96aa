//! Generator error types.

use core::fmt;

use sowkit_rag::RagError;

/// Errors that can occur while answering or drafting.
#[derive(Debug)]
pub enum SowError {
    /// Retrieval of context failed.
    Retrieval(RagError),

    /// The language model call failed.
    Llm(String),

    /// A prompt template failed to render.
    Template(askama::Error),
}

impl fmt::Display for SowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retrieval(e) => write!(f, "retrieval failed: {e}"),
            Self::Llm(e) => write!(f, "LLM error: {e}"),
            Self::Template(e) => write!(f, "prompt template failed: {e}"),
        }
    }
}

impl std::error::Error for SowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Retrieval(e) => Some(e),
            Self::Template(e) => Some(e),
            Self::Llm(_) => None,
        }
    }
}

impl From<RagError> for SowError {
    fn from(e: RagError) -> Self {
        Self::Retrieval(e)
    }
}

impl From<askama::Error> for SowError {
    fn from(e: askama::Error) -> Self {
        Self::Template(e)
    }
}

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, SowError>;
