//! Statement of Work drafting.

use askama::Template;
use chrono::{Local, NaiveDate};
use sowkit_core::{
    EmbeddingModel, LanguageModel,
    llm::{Parameters, oneshot},
};
use sowkit_rag::Retriever;
use sowkit_websearch::{SearchProvider, snippets};

use crate::error::{Result, SowError};
use crate::fences::strip_code_fences;
use crate::prompt::{SowSystemPrompt, SowUserPrompt, drafting_context, library_mentions, technologies};

/// Reply given when the library holds too little context for a draft.
pub const INSUFFICIENT_CONTEXT_MESSAGE: &str = "I’m sorry, I don’t have enough information from our AI Enhanced Library to craft a proper SOW. Please email dm@gtmharmony.com with additional context.";

/// Chunks retrieved per draft.
pub const DRAFT_K: usize = 5;
/// Fewest retrieved chunks a draft may be based on.
pub const MIN_CONTEXT_CHUNKS: usize = 3;
/// Web search results used per technology.
pub const SEARCH_RESULTS: usize = 3;

/// The intake form of a drafting request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SowRequest {
    /// Problem statement; also the retrieval query.
    pub problem: String,
    /// Stakeholders and participants.
    pub participants: String,
    /// Comma-separated go-to-market technologies.
    pub gtm_stack: String,
    /// Proposed timeline.
    pub timeline: String,
}

/// Outcome of a drafting request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    /// Retrieval returned too few chunks; the model was not called.
    Insufficient,
    /// HTML document produced by the model.
    Document(String),
}

impl Draft {
    /// HTML to show the user.
    #[must_use]
    pub fn into_html(self) -> String {
        match self {
            Self::Insufficient => INSUFFICIENT_CONTEXT_MESSAGE.to_string(),
            Self::Document(html) => html,
        }
    }
}

/// Drafts Statements of Work from library context, with web search filling gaps.
#[derive(Debug)]
pub struct SowDrafter<M, L, S> {
    retriever: Retriever<M>,
    model: L,
    search: S,
}

impl<M, L, S> SowDrafter<M, L, S>
where
    M: EmbeddingModel,
    L: LanguageModel,
    S: SearchProvider,
{
    /// Creates a drafter.
    pub const fn new(retriever: Retriever<M>, model: L, search: S) -> Self {
        Self {
            retriever,
            model,
            search,
        }
    }

    /// Drafts a SOW dated today.
    ///
    /// # Errors
    ///
    /// See [`draft_on`](Self::draft_on).
    pub async fn draft(&self, request: &SowRequest) -> Result<Draft> {
        self.draft_on(request, Local::now().date_naive()).await
    }

    /// Drafts a SOW dated `date`.
    ///
    /// Fewer than [`MIN_CONTEXT_CHUNKS`] retrieved chunks yield [`Draft::Insufficient`] without
    /// a model call. Each technology in the GTM stack is backed by the chunks that mention it,
    /// or by web search snippets when none do.
    ///
    /// # Errors
    ///
    /// Returns an error if retrieval, prompt rendering or the model call fails. Web search
    /// failures are not errors.
    pub async fn draft_on(&self, request: &SowRequest, date: NaiveDate) -> Result<Draft> {
        let chunks = self.retriever.retrieve(&request.problem, DRAFT_K).await?;
        if chunks.len() < MIN_CONTEXT_CHUNKS {
            tracing::info!(chunks = chunks.len(), "Not enough context for a SOW");
            return Ok(Draft::Insufficient);
        }

        let mut search_texts = Vec::new();
        for technology in technologies(&request.gtm_stack) {
            let text = match library_mentions(&chunks, technology) {
                Some(text) => text,
                None => {
                    tracing::debug!(technology, "No library mention, searching the web");
                    snippets(&self.search, technology, SEARCH_RESULTS).await
                }
            };
            search_texts.push(text);
        }

        let date = date.format("%B %d, %Y").to_string();
        let context = drafting_context(&chunks, &search_texts);
        let system = SowSystemPrompt { date: &date }.render()?;
        let user = SowUserPrompt {
            date: &date,
            context: &context,
            problem: &request.problem,
            participants: &request.participants,
            gtm_stack: &request.gtm_stack,
            timeline: &request.timeline,
        }
        .render()?;

        let prompt = oneshot(system, user).with_parameters(Parameters::deterministic());
        let raw = self
            .model
            .respond(prompt)
            .await
            .map_err(|e| SowError::Llm(e.to_string()))?;
        tracing::info!(chars = raw.len(), "SOW drafted");
        Ok(Draft::Document(strip_code_fences(&raw).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{MockLlm, MockSearch, retriever};
    use sowkit_core::llm::Role;
    use std::sync::atomic::Ordering;

    fn request(gtm_stack: &str) -> SowRequest {
        SowRequest {
            problem: "Pipeline reviews are inconsistent".into(),
            participants: "CRO, RevOps lead".into(),
            gtm_stack: gtm_stack.into(),
            timeline: "8 weeks".into(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
    }

    const LIBRARY: [&str; 4] = [
        "Weekly pipeline reviews in HubSpot dashboards.",
        "Stage exit criteria reduce slippage.",
        "Forecast categories need owners.",
        "Deal desk approvals for discounts.",
    ];

    #[tokio::test]
    async fn too_little_context_skips_the_model() {
        let llm = MockLlm::replying("<h1>SOW</h1>");
        let search = MockSearch::default();
        let drafter = SowDrafter::new(retriever(&LIBRARY[..2]).await, &llm, &search);

        let draft = drafter.draft_on(&request("HubSpot"), date()).await.unwrap();
        assert_eq!(draft, Draft::Insufficient);
        assert_eq!(draft.into_html(), INSUFFICIENT_CONTEXT_MESSAGE);
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
        assert_eq!(search.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn drafts_with_library_and_search_context() {
        let llm = MockLlm::replying("```html\n<h1>Statement of Work</h1>\n```");
        let search = MockSearch::default();
        let drafter = SowDrafter::new(retriever(&LIBRARY).await, &llm, &search);

        let draft = drafter
            .draft_on(&request("HubSpot, Gong"), date())
            .await
            .unwrap();
        assert_eq!(draft, Draft::Document("<h1>Statement of Work</h1>".into()));

        // HubSpot is in the library; only Gong goes to the web.
        assert_eq!(search.queries(), ["Gong"]);

        let prompt = llm.last_request().unwrap();
        assert_eq!(prompt.parameters().temperature, Some(0.0));
        let messages = prompt.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role(), Role::System);
        assert!(messages[0].content().contains("dated March 04, 2025"));

        let user = messages[1].content();
        assert!(user.starts_with("Document Date: March 04, 2025"));
        assert_eq!(user.matches("[Document Excerpt]").count(), 4);
        assert!(user.contains("[Live Search]\nGong snippet"));
        assert!(user.contains("[Live Search]\nWeekly pipeline reviews in HubSpot dashboards."));
        assert!(user.contains("GTM Stack:\nHubSpot, Gong\n"));
    }

    #[tokio::test]
    async fn failed_search_adds_nothing() {
        let llm = MockLlm::replying("<p>ok</p>");
        let search = MockSearch::failing();
        let drafter = SowDrafter::new(retriever(&LIBRARY).await, &llm, &search);

        drafter.draft_on(&request("Clari"), date()).await.unwrap();
        let prompt = llm.last_request().unwrap();
        assert!(!prompt.messages()[1].content().contains("[Live Search]"));
    }

    #[tokio::test]
    async fn model_failure_propagates() {
        let llm = MockLlm::failing();
        let drafter = SowDrafter::new(retriever(&LIBRARY).await, &llm, MockSearch::default());
        assert!(matches!(
            drafter.draft_on(&request(""), date()).await,
            Err(SowError::Llm(_))
        ));
    }
}
