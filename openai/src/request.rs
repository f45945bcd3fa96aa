use serde::Serialize;
use sowkit_core::llm::{Message, Parameters};

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessagePayload<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    pub fn new(model: &'a str, messages: &'a [Message], parameters: &Parameters) -> Self {
        Self {
            model,
            messages: messages.iter().map(ChatMessagePayload::from).collect(),
            stream: false,
            temperature: parameters.temperature,
            max_tokens: parameters.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatMessagePayload<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a Message> for ChatMessagePayload<'a> {
    fn from(message: &'a Message) -> Self {
        Self {
            role: message.role().as_str(),
            content: message.content(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmbeddingRequest<'a> {
    pub model: &'a str,
    pub input: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_serializes_messages_in_order() {
        let messages = [Message::system("rules"), Message::user("question")];
        let params = Parameters::deterministic();
        let req = ChatCompletionRequest::new("gpt-4-turbo", &messages, &params);
        let value = serde_json::to_value(&req).expect("serialize chat request");

        assert_eq!(value["model"], "gpt-4-turbo");
        assert_eq!(value["stream"], false);
        assert_eq!(value["temperature"], 0.0);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "question");
    }

    #[test]
    fn unset_parameters_are_omitted() {
        let messages = [Message::user("hi")];
        let req = ChatCompletionRequest::new("gpt-4o-mini", &messages, &Parameters::default());
        let value = serde_json::to_value(&req).expect("serialize chat request");

        assert!(value.get("temperature").is_none());
        assert!(value.get("max_tokens").is_none());
    }
}
