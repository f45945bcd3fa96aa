use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if any.
    pub(crate) fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
    }
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingItem>,
}

impl EmbeddingResponse {
    pub(crate) fn into_vector(self) -> Option<Vec<f32>> {
        self.data.into_iter().next().map(|item| item.embedding)
    }
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Extracts the API's error message, falling back to the raw body.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body).map_or_else(
        |_| body.trim().to_string(),
        |envelope| envelope.error.message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_response_yields_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"<h1>SOW</h1>"}},{"message":{"content":"other"}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.into_text().as_deref(), Some("<h1>SOW</h1>"));
    }

    #[test]
    fn chat_response_without_choices_is_empty() {
        let parsed: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.into_text().is_none());
    }

    #[test]
    fn embedding_response_takes_first_vector() {
        let body = r#"{"data":[{"embedding":[0.5,-0.25],"index":0}],"model":"text-embedding-3-large"}"#;
        let parsed: EmbeddingResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.into_vector(), Some(vec![0.5, -0.25]));
    }

    #[test]
    fn error_message_prefers_envelope() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(error_message(body), "Incorrect API key provided");
        assert_eq!(error_message(" bad gateway \n"), "bad gateway");
    }
}
