//! Direct question answering over the library.

use askama::Template;
use sowkit_core::{
    EmbeddingModel, LanguageModel,
    llm::{Message, Parameters, Request},
};
use sowkit_rag::Retriever;

use crate::error::{Result, SowError};
use crate::prompt::{CONTEXT_SEPARATOR, QaPrompt};

/// Answers questions from retrieved library context.
#[derive(Debug)]
pub struct Answerer<M, L> {
    retriever: Retriever<M>,
    model: L,
}

impl<M: EmbeddingModel, L: LanguageModel> Answerer<M, L> {
    /// Creates an answerer.
    pub const fn new(retriever: Retriever<M>, model: L) -> Self {
        Self { retriever, model }
    }

    /// Answers `question` with the retriever's default number of context chunks.
    ///
    /// The model's reply is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if retrieval or the model call fails.
    pub async fn answer(&self, question: &str) -> Result<String> {
        let chunks = self
            .retriever
            .retrieve(question, self.retriever.default_k())
            .await?;
        let prompt = QaPrompt {
            context: &chunks.join(CONTEXT_SEPARATOR),
            question,
        }
        .render()?;

        let request = Request::new([Message::user(prompt.trim_end())])
            .with_parameters(Parameters::deterministic());
        self.model
            .respond(request)
            .await
            .map_err(|e| SowError::Llm(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{MockLlm, retriever};
    use sowkit_core::llm::Role;

    #[tokio::test]
    async fn one_user_message_at_temperature_zero() {
        let llm = MockLlm::replying("Use MEDDICC.");
        let answerer = Answerer::new(retriever(&["Qualify with MEDDICC.", "Score leads."]).await, &llm);

        let answer = answerer.answer("How do we qualify?").await.unwrap();
        assert_eq!(answer, "Use MEDDICC.");

        let request = llm.last_request().unwrap();
        assert_eq!(request.messages().len(), 1);
        assert_eq!(request.messages()[0].role(), Role::User);
        assert_eq!(request.parameters().temperature, Some(0.0));

        let prompt = request.messages()[0].content();
        assert!(prompt.contains("Qualify with MEDDICC."));
        assert!(prompt.contains("\n---\n"));
        assert!(prompt.ends_with("Question: How do we qualify?\nAnswer:"));
    }

    #[tokio::test]
    async fn model_failure_propagates() {
        let llm = MockLlm::failing();
        let answerer = Answerer::new(retriever(&["Score leads."]).await, &llm);
        assert!(matches!(
            answerer.answer("anything").await,
            Err(SowError::Llm(_))
        ));
    }
}
