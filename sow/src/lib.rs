//! Answer and document generation on top of library retrieval.
//!
//! - [`Answerer`] – answer a free-form question from retrieved context.
//! - [`SowDrafter`] – draft an HTML Statement of Work from an intake form, backed by retrieved
//!   library excerpts and best-effort web search per technology.
//!
//! Both call the language model deterministically (temperature zero) and never retry.
//!
//! # Example
//!
//! ```rust,ignore
//! use sowkit_sow::{SowDrafter, SowRequest};
//!
//! let drafter = SowDrafter::new(retriever, llm, DuckDuckGo::new());
//! let html = drafter.draft(&SowRequest {
//!     problem: "Forecasts miss by 30%".into(),
//!     gtm_stack: "Salesforce, Clari".into(),
//!     ..SowRequest::default()
//! }).await?.into_html();
//! ```

mod answer;
mod draft;
mod error;
mod fences;
mod prompt;

pub use answer::Answerer;
pub use draft::{
    DRAFT_K, Draft, INSUFFICIENT_CONTEXT_MESSAGE, MIN_CONTEXT_CHUNKS, SEARCH_RESULTS, SowDrafter,
    SowRequest,
};
pub use error::{Result, SowError};
pub use fences::strip_code_fences;
pub use prompt::{drafting_context, library_mentions, technologies};

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use sowkit_core::{
        EmbeddingModel, LanguageModel,
        llm::Request,
    };
    use sowkit_rag::{Retriever, Snapshot};
    use sowkit_websearch::{SearchProvider, SearchResult};

    /// Every text embeds to the same vector, so retrieval returns insertion order.
    #[derive(Debug, Default)]
    pub(crate) struct FlatEmbedder;

    impl EmbeddingModel for FlatEmbedder {
        fn dim(&self) -> usize {
            2
        }

        async fn embed(&self, _text: &str) -> sowkit_core::Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }
    }

    pub(crate) async fn retriever(texts: &[&str]) -> Retriever<FlatEmbedder> {
        let mut snapshot = Snapshot::default();
        for text in texts {
            let vector = FlatEmbedder.embed(text).await.unwrap();
            snapshot.push(&vector, *text).unwrap();
        }
        Retriever::from_parts(FlatEmbedder, snapshot, 5)
    }

    #[derive(Debug)]
    pub(crate) struct MockLlm {
        reply: Option<String>,
        pub(crate) calls: AtomicUsize,
        last: Mutex<Option<Request>>,
    }

    impl MockLlm {
        pub(crate) fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            }
        }

        pub(crate) fn last_request(&self) -> Option<Request> {
            self.last.lock().unwrap().clone()
        }
    }

    #[derive(Debug)]
    pub(crate) struct LlmDown;

    impl std::fmt::Display for LlmDown {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("service unavailable")
        }
    }

    impl std::error::Error for LlmDown {}

    impl LanguageModel for MockLlm {
        type Error = LlmDown;

        async fn respond(&self, request: Request) -> Result<String, Self::Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(request);
            self.reply.clone().ok_or(LlmDown)
        }
    }

    #[derive(Debug, Default)]
    pub(crate) struct MockSearch {
        fail: bool,
        pub(crate) calls: AtomicUsize,
        queries: Mutex<Vec<String>>,
    }

    impl MockSearch {
        pub(crate) fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub(crate) fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    impl SearchProvider for MockSearch {
        async fn search(&self, query: &str, _limit: usize) -> anyhow::Result<Vec<SearchResult>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(query.to_string());
            if self.fail {
                anyhow::bail!("offline");
            }
            Ok(vec![SearchResult {
                title: query.to_string(),
                url: String::new(),
                snippet: format!("{query} snippet"),
            }])
        }
    }
}
