use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::provider::LlmProvider;
use super::types::GenerateRequest;
use crate::errors::ApiError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Gemini REST API (generateContent + embedContent).
#[derive(Clone)]
pub struct GeminiProvider {
    base_url: String,
    api_key: String,
    chat_model: String,
    embed_model: String,
    client: Client,
}

impl GeminiProvider {
    pub fn new(api_key: String, chat_model: String, embed_model: String) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), api_key, chat_model, embed_model)
    }

    /// Mainly for tests pointing at a stub server.
    pub fn with_base_url(
        base_url: String,
        api_key: String,
        chat_model: String,
        embed_model: String,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            chat_model,
            embed_model,
            client: Client::new(),
        }
    }

    fn endpoint(&self, model: &str, action: &str) -> String {
        // Model ids already carry the "models/" prefix. The API key goes
        // in a header so it never shows up in error text or logs.
        format!("{}/{}:{}", self.base_url, model, action)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, ApiError> {
        let url = self.endpoint(&self.embed_model, "batchEmbedContents");

        let requests: Vec<Value> = inputs
            .iter()
            .map(|text| {
                json!({
                    "model": self.embed_model,
                    "content": { "parts": [{ "text": text }] },
                })
            })
            .collect();

        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({ "requests": requests }))
            .send()
            .await
            .map_err(ApiError::provider)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Provider(format!(
                "Gemini embed error ({}): {}",
                status, text
            )));
        }

        let payload: Value = res.json().await.map_err(ApiError::provider)?;

        let embeddings: Vec<Vec<f32>> = payload["embeddings"]
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| {
                        entry["values"]
                            .as_array()
                            .map(|vals| {
                                vals.iter()
                                    .filter_map(|v| v.as_f64().map(|f| f as f32))
                                    .collect()
                            })
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .unwrap_or_default();

        if embeddings.len() != inputs.len() {
            return Err(ApiError::Provider(format!(
                "Gemini embed returned {} vectors for {} inputs",
                embeddings.len(),
                inputs.len()
            )));
        }

        Ok(embeddings)
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String, ApiError> {
        let url = self.endpoint(&self.chat_model, "generateContent");

        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }],
            }],
        });

        let mut generation_config = serde_json::Map::new();
        if let Some(t) = request.temperature {
            generation_config.insert("temperature".to_string(), json!(t));
        }
        if let Some(m) = request.max_output_tokens {
            generation_config.insert("maxOutputTokens".to_string(), json!(m));
        }
        if !generation_config.is_empty() {
            body["generationConfig"] = Value::Object(generation_config);
        }

        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::provider)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Provider(format!(
                "Gemini generate error ({}): {}",
                status, text
            )));
        }

        let payload: Value = res.json().await.map_err(ApiError::provider)?;

        let answer = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string());

        answer.ok_or_else(|| {
            ApiError::Provider("Gemini generate returned no candidate text".to_string())
        })
    }
}
