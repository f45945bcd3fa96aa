use crate::{
    client::{Config, OpenAI},
    error::OpenAIError,
    request::EmbeddingRequest,
    response::EmbeddingResponse,
};
use sowkit_core::{EmbeddingModel, Result as CoreResult};
use std::sync::Arc;

impl EmbeddingModel for OpenAI {
    fn dim(&self) -> usize {
        self.config().embedding_dimensions
    }

    fn embed(&self, text: &str) -> impl core::future::Future<Output = CoreResult<Vec<f32>>> + Send {
        let cfg = self.config();
        let input = text.to_owned();
        async move {
            let vector = embed_once(cfg, input).await?;
            Ok(vector)
        }
    }
}

async fn embed_once(cfg: Arc<Config>, input: String) -> Result<Vec<f32>, OpenAIError> {
    let request = EmbeddingRequest {
        model: &cfg.embedding_model,
        input: &input,
    };
    let response: EmbeddingResponse = cfg.post("/embeddings", &request).await?;
    response
        .into_vector()
        .ok_or(OpenAIError::EmptyResponse("embedding vector data"))
}
