//! DuckDuckGo Instant Answer API provider.
//!
//! [DuckDuckGo](https://duckduckgo.com/) provides a free instant answer API
//! that doesn't require an API key. Note that this API returns instant answers
//! and related topics rather than traditional web search results.
//!
//! # Example
//!
//! ```no_run
//! use sowkit_websearch::{DuckDuckGo, SearchProvider};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = DuckDuckGo::new();
//! let results = provider.search("hubspot revops", 3).await?;
//! for result in results {
//!     println!("{}: {}", result.title, result.snippet);
//! }
//! # Ok(())
//! # }
//! ```

use crate::{SearchProvider, SearchResult};
use anyhow::{Context, Result};
use reqwest::header;
use serde::Deserialize;

/// DuckDuckGo Instant Answer API endpoint.
const DDG_API_URL: &str = "https://api.duckduckgo.com/";

/// DuckDuckGo Instant Answer API provider.
///
/// Uses the [DuckDuckGo Instant Answer API](https://api.duckduckgo.com/api) which
/// is free and doesn't require authentication. Returns the abstract and related topics.
#[derive(Debug, Clone)]
pub struct DuckDuckGo {
    client: reqwest::Client,
    endpoint: String,
}

impl Default for DuckDuckGo {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DDG_API_URL.to_string(),
        }
    }
}

impl DuckDuckGo {
    /// Create a new DuckDuckGo provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the provider at another endpoint speaking the same API.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn url(&self, query: &str) -> String {
        format!(
            "{}?q={}&format=json&no_html=1&skip_disambig=1",
            self.endpoint,
            urlencoded(query)
        )
    }
}

impl SearchProvider for DuckDuckGo {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let response: DdgResponse = self
            .client
            .get(self.url(query))
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, "sowkit-websearch/0.1")
            .send()
            .await
            .context("DuckDuckGo request failed")?
            .error_for_status()?
            .json()
            .await
            .context("DuckDuckGo returned malformed JSON")?;

        Ok(response.into_results(limit))
    }
}

#[derive(Debug, Deserialize)]
struct DdgResponse {
    #[serde(rename = "Heading", default)]
    heading: String,
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "AbstractURL", default)]
    abstract_url: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<DdgTopic>,
}

#[derive(Debug, Deserialize)]
struct DdgTopic {
    #[serde(rename = "Text")]
    text: Option<String>,
    #[serde(rename = "FirstURL")]
    first_url: Option<String>,
}

impl DdgResponse {
    fn into_results(self, limit: usize) -> Vec<SearchResult> {
        let mut results = Vec::new();

        if !self.abstract_text.is_empty() {
            results.push(SearchResult {
                title: self.heading,
                url: self.abstract_url,
                snippet: self.abstract_text,
            });
        }

        // Topic groups carry no text and are skipped.
        for topic in self.related_topics {
            if let Some(text) = topic.text {
                results.push(SearchResult {
                    title: topic.first_url.as_deref().unwrap_or("Related").to_string(),
                    url: topic.first_url.unwrap_or_default(),
                    snippet: text,
                });
            }
        }

        results.truncate(limit);
        results
    }
}

fn urlencoded(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "Heading": "Salesforce",
        "AbstractText": "Salesforce is a cloud CRM.",
        "AbstractURL": "https://en.wikipedia.org/wiki/Salesforce",
        "RelatedTopics": [
            {"Text": "Salesforce Marketing Cloud", "FirstURL": "https://duckduckgo.com/Marketing_Cloud"},
            {"Name": "See also", "Topics": []},
            {"Text": "Salesforce Tower", "FirstURL": "https://duckduckgo.com/Salesforce_Tower"}
        ]
    }"#;

    #[test]
    fn abstract_comes_first_and_groups_are_skipped() {
        let response: DdgResponse = serde_json::from_str(FIXTURE).unwrap();
        let results = response.into_results(5);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].snippet, "Salesforce is a cloud CRM.");
        assert_eq!(results[2].snippet, "Salesforce Tower");
    }

    #[test]
    fn respects_limit() {
        let response: DdgResponse = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(response.into_results(2).len(), 2);
    }

    #[test]
    fn empty_answer_has_no_results() {
        let response: DdgResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_results(3).is_empty());
    }

    #[test]
    fn query_is_form_encoded() {
        let url = DuckDuckGo::new().url("HubSpot & Gong");
        assert_eq!(
            url,
            "https://api.duckduckgo.com/?q=HubSpot+%26+Gong&format=json&no_html=1&skip_disambig=1"
        );
    }
}
