//! # Language Models
//!
//! Provider-agnostic chat completion. A [`Request`] bundles the conversation and its sampling
//! [`Parameters`]; a [`LanguageModel`] turns it into the assistant's reply text.
//!
//! ```rust
//! use sowkit_core::llm::{LanguageModel, Parameters, oneshot};
//!
//! async fn summarize(model: impl LanguageModel, text: &str) -> Result<String, Box<dyn std::error::Error>> {
//!     let request = oneshot("Summarize the excerpt in one sentence.", text)
//!         .with_parameters(Parameters::deterministic());
//!     Ok(model.respond(request).await?)
//! }
//! ```

pub mod message;
pub mod model;

use alloc::{string::String, sync::Arc, vec::Vec};
use core::future::Future;

pub use message::{Message, Role};
pub use model::Parameters;

/// A completion request: ordered messages plus sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    messages: Vec<Message>,
    parameters: Parameters,
}

impl Request {
    /// Creates a request with default parameters.
    pub fn new(messages: impl Into<Vec<Message>>) -> Self {
        Self {
            messages: messages.into(),
            parameters: Parameters::default(),
        }
    }

    /// Replaces the sampling parameters.
    #[must_use]
    pub const fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Returns the conversation.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the sampling parameters.
    #[must_use]
    pub const fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Splits the request into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Message>, Parameters) {
        (self.messages, self.parameters)
    }
}

/// Generates text from a conversation.
pub trait LanguageModel: Send + Sync {
    /// Provider error.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Returns the assistant reply for `request`.
    fn respond(&self, request: Request) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

impl<T: LanguageModel> LanguageModel for &T {
    type Error = T::Error;

    fn respond(&self, request: Request) -> impl Future<Output = Result<String, Self::Error>> + Send {
        (**self).respond(request)
    }
}

impl<T: LanguageModel> LanguageModel for Arc<T> {
    type Error = T::Error;

    fn respond(&self, request: Request) -> impl Future<Output = Result<String, Self::Error>> + Send {
        (**self).respond(request)
    }
}

/// Builds a system + user request.
pub fn oneshot(system: impl Into<String>, user: impl Into<String>) -> Request {
    Request::new([Message::system(system), Message::user(user)])
}
