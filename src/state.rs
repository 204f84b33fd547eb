use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::AppConfig;
use crate::index::{ensure_index, VectorIndex};
use crate::llm::{GeminiProvider, LlmProvider};
use crate::pipeline::QueryPipeline;

/// Everything handlers need, built once at startup and shared behind an
/// `Arc`. The index is read-only after `initialize`, so no locking.
pub struct AppState {
    pub config: AppConfig,
    pub provider: Arc<dyn LlmProvider>,
    pub index: Arc<VectorIndex>,
    pub pipeline: QueryPipeline,
    #[allow(dead_code)]
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub async fn initialize(config: AppConfig) -> anyhow::Result<Arc<Self>> {
        let provider: Arc<dyn LlmProvider> = Arc::new(GeminiProvider::new(
            config.api_key.clone(),
            config.chat_model.clone(),
            config.embed_model.clone(),
        ));

        Self::with_provider(config, provider).await
    }

    /// Build state around an explicit provider. Lets tests inject a stub
    /// instead of the live Gemini client.
    pub async fn with_provider(
        config: AppConfig,
        provider: Arc<dyn LlmProvider>,
    ) -> anyhow::Result<Arc<Self>> {
        let index = Arc::new(ensure_index(&config, provider.as_ref()).await?);
        let pipeline = QueryPipeline::new(provider.clone(), index.clone(), config.top_k);

        Ok(Arc::new(AppState {
            config,
            provider,
            index,
            pipeline,
            started_at: Utc::now(),
        }))
    }
}
