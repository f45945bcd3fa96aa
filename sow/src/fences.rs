//! Model output cleanup.

/// Strips a Markdown code fence wrapped around model output.
///
/// The text is trimmed, a leading "```html" and then a leading "```" are removed, a trailing
/// "```" is removed, and the result is trimmed again. Unfenced text only loses surrounding
/// whitespace.
///
/// ```rust
/// use sowkit_sow::strip_code_fences;
///
/// assert_eq!(strip_code_fences("```html\n<h1>SOW</h1>\n```"), "<h1>SOW</h1>");
/// ```
#[must_use]
pub fn strip_code_fences(raw: &str) -> &str {
    let text = raw.trim();
    let text = text.strip_prefix("```html").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}
