use crate::{
    EMBEDDING_ADA002, EMBEDDING_LARGE, EMBEDDING_SMALL, GPT4O_MINI, OPENAI_BASE_URL,
    error::OpenAIError,
    request::ChatCompletionRequest,
    response::{ChatCompletionResponse, error_message},
};
use reqwest::header;
use serde::{Serialize, de::DeserializeOwned};
use sowkit_core::{LanguageModel, llm::Request};
use std::{future::Future, sync::Arc, time::Duration};

/// Default request timeout (5 minutes, generous for long completions).
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// `OpenAI` client implementing both chat completion and embeddings.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct OpenAI {
    inner: Arc<Config>,
}

impl OpenAI {
    /// Create a new client using the provided API key and default models.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder(api_key).build()
    }

    /// Start building an [`OpenAI`] client with custom configuration.
    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> Builder {
        Builder::new(api_key)
    }

    /// Override the chat model in-place.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.inner).chat_model = sanitize_model(model);
        self
    }

    /// Override the REST base URL (useful for OpenAI-compatible endpoints).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.inner).base_url = base_url.into();
        self
    }

    /// Override the embeddings model identifier.
    #[must_use]
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        let model = sanitize_model(model);
        let cfg = Arc::make_mut(&mut self.inner);
        if let Some(dim) = infer_embedding_dim(&model) {
            cfg.embedding_dimensions = dim;
        }
        cfg.embedding_model = model;
        self
    }

    /// Chat model used by [`LanguageModel::respond`].
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.chat_model
    }

    /// Embeddings model used by [`sowkit_core::EmbeddingModel::embed`].
    #[must_use]
    pub fn embedding_model(&self) -> &str {
        &self.inner.embedding_model
    }

    pub(crate) fn config(&self) -> Arc<Config> {
        self.inner.clone()
    }
}

impl LanguageModel for OpenAI {
    type Error = OpenAIError;

    fn respond(&self, request: Request) -> impl Future<Output = Result<String, Self::Error>> + Send {
        let cfg = self.config();
        async move {
            let (messages, parameters) = request.into_parts();
            let payload = ChatCompletionRequest::new(&cfg.chat_model, &messages, &parameters);
            tracing::debug!(model = %cfg.chat_model, messages = messages.len(), "chat completion");
            let response: ChatCompletionResponse = cfg.post("/chat/completions", &payload).await?;
            response
                .into_text()
                .ok_or(OpenAIError::EmptyResponse("choices[0].message.content"))
        }
    }
}

/// Builder for [`OpenAI`].
#[derive(Debug)]
pub struct Builder {
    api_key: String,
    base_url: String,
    chat_model: String,
    embedding_model: String,
    embedding_dimensions: usize,
    organization: Option<String>,
    request_timeout: Duration,
}

impl Builder {
    fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_string(),
            chat_model: GPT4O_MINI.to_string(),
            embedding_model: EMBEDDING_LARGE.to_string(),
            embedding_dimensions: 3072,
            organization: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set a custom API base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Select a chat model identifier (e.g., `gpt-4o-mini`, `gpt-4-turbo`).
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = sanitize_model(model);
        self
    }

    /// Select the embeddings model identifier.
    #[must_use]
    pub fn embedding_model(mut self, model: impl Into<String>) -> Self {
        let model = sanitize_model(model);
        if let Some(dim) = infer_embedding_dim(&model) {
            self.embedding_dimensions = dim;
        }
        self.embedding_model = model;
        self
    }

    /// Override the embedding vector dimension.
    #[must_use]
    pub const fn embedding_dimensions(mut self, dimensions: usize) -> Self {
        self.embedding_dimensions = dimensions;
        self
    }

    /// Send requests on behalf of an organization.
    #[must_use]
    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Override the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Finalize the builder.
    #[must_use]
    pub fn build(self) -> OpenAI {
        let http = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .user_agent("sowkit-openai/0.1")
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "falling back to default HTTP client");
                reqwest::Client::new()
            });
        OpenAI {
            inner: Arc::new(Config {
                api_key: self.api_key,
                base_url: self.base_url,
                chat_model: self.chat_model,
                embedding_model: self.embedding_model,
                embedding_dimensions: self.embedding_dimensions,
                organization: self.organization,
                http,
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) chat_model: String,
    pub(crate) embedding_model: String,
    pub(crate) embedding_dimensions: usize,
    pub(crate) organization: Option<String>,
    pub(crate) http: reqwest::Client,
}

impl Config {
    pub(crate) fn request_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) fn request_auth(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// POSTs a JSON body and decodes a JSON reply, mapping non-2xx statuses to [`OpenAIError::Api`].
    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, OpenAIError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let mut builder = self
            .http
            .post(self.request_url(path))
            .header(header::AUTHORIZATION, self.request_auth())
            .json(body);
        if let Some(org) = &self.organization {
            builder = builder.header("OpenAI-Organization", org);
        }
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(OpenAIError::Api {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}

fn sanitize_model(model: impl Into<String>) -> String {
    model.into().trim().to_string()
}

fn infer_embedding_dim(model: &str) -> Option<usize> {
    match model {
        EMBEDDING_LARGE => Some(3072),
        EMBEDDING_SMALL | EMBEDDING_ADA002 => Some(1536),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GPT4_TURBO;
    use sowkit_core::EmbeddingModel;

    #[test]
    fn defaults_match_large_embeddings() {
        let client = OpenAI::new("sk-test");
        assert_eq!(client.model(), GPT4O_MINI);
        assert_eq!(client.embedding_model(), EMBEDDING_LARGE);
        assert_eq!(client.dim(), 3072);
    }

    #[test]
    fn embedding_model_infers_dimension() {
        let client = OpenAI::builder("sk-test")
            .embedding_model(" text-embedding-3-small ")
            .build();
        assert_eq!(client.embedding_model(), EMBEDDING_SMALL);
        assert_eq!(client.dim(), 1536);
    }

    #[test]
    fn unknown_embedding_model_keeps_explicit_dimension() {
        let client = OpenAI::builder("sk-test")
            .embedding_dimensions(256)
            .embedding_model("custom-embedder")
            .build();
        assert_eq!(client.dim(), 256);
    }

    #[test]
    fn with_model_does_not_touch_clones() {
        let base = OpenAI::new("sk-test");
        let drafter = base.clone().with_model(GPT4_TURBO);
        assert_eq!(base.model(), GPT4O_MINI);
        assert_eq!(drafter.model(), GPT4_TURBO);
    }

    #[test]
    fn request_url_joins_cleanly() {
        let client = OpenAI::builder("sk-test")
            .base_url("http://localhost:8080/v1/")
            .build();
        let cfg = client.config();
        assert_eq!(
            cfg.request_url("/chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );
        assert_eq!(cfg.request_auth(), "Bearer sk-test");
    }
}
