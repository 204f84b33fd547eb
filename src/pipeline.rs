//! Query pipeline: embed the question, retrieve the closest chunks,
//! ask the model for an answer grounded in them.

use std::sync::Arc;

use crate::errors::ApiError;
use crate::index::VectorIndex;
use crate::llm::{GenerateRequest, LlmProvider};

pub struct QueryPipeline {
    provider: Arc<dyn LlmProvider>,
    index: Arc<VectorIndex>,
    top_k: usize,
}

impl QueryPipeline {
    pub fn new(provider: Arc<dyn LlmProvider>, index: Arc<VectorIndex>, top_k: usize) -> Self {
        Self {
            provider,
            index,
            top_k,
        }
    }

    /// Answer a single question. Stateless: no caching, no history, no
    /// retries; provider failures surface as the error variant.
    pub async fn answer(&self, query: &str) -> Result<String, ApiError> {
        let query_embeddings = self.provider.embed(&[query.to_string()]).await?;
        let query_embedding = query_embeddings
            .first()
            .ok_or_else(|| ApiError::Provider("Empty embedding for query".to_string()))?;

        let results = self.index.search(query_embedding, self.top_k)?;
        tracing::debug!(
            "Retrieved {} chunks, best score {:.4}",
            results.len(),
            results.first().map(|r| r.score).unwrap_or(0.0)
        );

        let context = results
            .iter()
            .map(|result| result.entry.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let prompt = grounded_prompt(&context, query);

        self.provider.generate(GenerateRequest::new(prompt)).await
    }
}

fn grounded_prompt(context: &str, query: &str) -> String {
    format!(
        "Context information is below.\n\
         ---------------------\n\
         {context}\n\
         ---------------------\n\
         Given the context information and not prior knowledge, \
         answer the query.\n\
         Query: {query}\n\
         Answer:"
    )
}
