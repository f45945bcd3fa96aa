//! Prompt templates and context assembly.

use askama::Template;

/// Marks a retrieved library chunk in the drafting context.
const EXCERPT_HEADER: &str = "[Document Excerpt]";
/// Marks web search text in the drafting context.
const SEARCH_HEADER: &str = "[Live Search]";
/// Separates context entries.
pub(crate) const CONTEXT_SEPARATOR: &str = "\n---\n";

/// System prompt for SOW drafting.
#[derive(Template)]
#[template(path = "sow_system.txt", escape = "none")]
pub(crate) struct SowSystemPrompt<'a> {
    pub(crate) date: &'a str,
}

/// User prompt for SOW drafting.
#[derive(Template)]
#[template(path = "sow_user.txt", escape = "none")]
pub(crate) struct SowUserPrompt<'a> {
    pub(crate) date: &'a str,
    pub(crate) context: &'a str,
    pub(crate) problem: &'a str,
    pub(crate) participants: &'a str,
    pub(crate) gtm_stack: &'a str,
    pub(crate) timeline: &'a str,
}

/// Single-message prompt for library Q&A.
#[derive(Template)]
#[template(path = "qa.txt", escape = "none")]
pub(crate) struct QaPrompt<'a> {
    pub(crate) context: &'a str,
    pub(crate) question: &'a str,
}

/// Comma-separated, trimmed, non-empty entries of a GTM stack field.
#[must_use]
pub fn technologies(gtm_stack: &str) -> Vec<&str> {
    gtm_stack
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Retrieved chunks mentioning `technology`, case-insensitively, one per line.
///
/// Returns `None` when no chunk mentions it.
#[must_use]
pub fn library_mentions(chunks: &[String], technology: &str) -> Option<String> {
    let needle = technology.to_lowercase();
    let found: Vec<&str> = chunks
        .iter()
        .filter(|c| c.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect();
    (!found.is_empty()).then(|| found.join("\n"))
}

/// Labels library chunks and non-empty search texts and joins them into one context block.
#[must_use]
pub fn drafting_context(chunks: &[String], search_texts: &[String]) -> String {
    chunks
        .iter()
        .map(|c| format!("{EXCERPT_HEADER}\n{c}"))
        .chain(
            search_texts
                .iter()
                .filter(|t| !t.is_empty())
                .map(|t| format!("{SEARCH_HEADER}\n{t}")),
        )
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}
