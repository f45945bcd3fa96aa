//! Web search for context augmentation.
//!
//! This crate provides a small interface over web search providers. Drafting code uses it
//! to fill in background on technologies the document library does not mention.
//!
//! # Providers
//!
//! | Provider | API Key | Description |
//! |----------|---------|-------------|
//! | [`DuckDuckGo`] | Not required | **Default** - Instant answers and related topics |
//!
//! # Best-effort lookups
//!
//! ```no_run
//! use sowkit_websearch::{DuckDuckGo, snippets};
//!
//! # async fn example() {
//! let text = snippets(&DuckDuckGo::new(), "Gong revenue intelligence", 3).await;
//! // Empty when the search failed or found nothing.
//! println!("{text}");
//! # }
//! ```

mod providers;

pub use providers::*;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title.
    pub title: String,
    /// Result URL.
    pub url: String,
    /// Short text excerpt.
    pub snippet: String,
}

/// A web search backend.
pub trait SearchProvider: Send + Sync {
    /// Returns at most `limit` results for `query`.
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SearchResult>>> + Send;
}

impl<T: SearchProvider> SearchProvider for &T {
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SearchResult>>> + Send {
        T::search(self, query, limit)
    }
}

impl<T: SearchProvider> SearchProvider for std::sync::Arc<T> {
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SearchResult>>> + Send {
        T::search(self, query, limit)
    }
}

/// Non-empty snippets for `query`, one per line.
///
/// Never fails: a provider error is logged at debug level and yields an empty string.
pub async fn snippets<P: SearchProvider>(provider: &P, query: &str, limit: usize) -> String {
    match provider.search(query, limit).await {
        Ok(results) => results
            .iter()
            .map(|r| r.snippet.as_str())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        Err(e) => {
            tracing::debug!(query, error = %e, "websearch failed");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Canned {
        fail: bool,
        calls: AtomicUsize,
    }

    impl SearchProvider for Canned {
        async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("network unreachable");
            }
            Ok(["first", "", "third", "fourth"]
                .into_iter()
                .take(limit)
                .map(|snippet| SearchResult {
                    title: query.to_string(),
                    url: String::new(),
                    snippet: snippet.to_string(),
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn joins_non_empty_snippets() {
        let provider = Canned::default();
        assert_eq!(snippets(&provider, "Outreach", 3).await, "first\nthird");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_is_empty() {
        let provider = Canned {
            fail: true,
            ..Canned::default()
        };
        assert_eq!(snippets(&provider, "Outreach", 3).await, "");
    }
}
