use async_trait::async_trait;

use super::types::GenerateRequest;
use crate::errors::ApiError;

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// return the provider name (e.g. "gemini")
    fn name(&self) -> &str;

    /// generate embeddings, one vector per input text
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, ApiError>;

    /// synthesize an answer for a grounded prompt (non-streaming)
    async fn generate(&self, request: GenerateRequest) -> Result<String, ApiError>;
}
