//! Persisted vector index: built once from the source document, then
//! reloaded from disk on every later start.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::chunker::split_into_chunks;
use crate::config::AppConfig;
use crate::errors::ApiError;
use crate::llm::LlmProvider;
use crate::vector_math::rank_descending_by_cosine;

const INDEX_FILE: &str = "index.json";
const INDEX_VERSION: u32 = 1;

/// A stored chunk with its embedding vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Unique chunk identifier.
    pub chunk_id: String,
    /// The text content of the chunk.
    pub content: String,
    /// Source identifier (filename).
    pub source: String,
    /// Chunk index within the source.
    pub chunk_index: usize,
    /// Embedding vector for the chunk.
    pub embedding: Vec<f32>,
}

/// Result of a similarity search.
#[derive(Debug, Clone)]
pub struct ChunkSearchResult {
    pub entry: IndexEntry,
    /// Similarity score (higher = better).
    pub score: f32,
}

/// On-disk index layout.
#[derive(Debug, Serialize, Deserialize)]
struct IndexFile {
    version: u32,
    embed_model: String,
    entries: Vec<IndexEntry>,
}

/// The full chunk collection. Read-only after startup, so handlers can
/// share it behind an `Arc` without locking.
#[derive(Debug)]
pub struct VectorIndex {
    embed_model: String,
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    pub fn new(embed_model: String, entries: Vec<IndexEntry>) -> Self {
        Self {
            embed_model,
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rank all entries against the query embedding and return the top `k`.
    pub fn search(
        &self,
        query_embedding: &[f32],
        k: usize,
    ) -> Result<Vec<ChunkSearchResult>, ApiError> {
        if self.entries.is_empty() {
            return Err(ApiError::Index("Index contains no entries".to_string()));
        }

        let candidates: Vec<Vec<f32>> = self
            .entries
            .iter()
            .map(|entry| entry.embedding.clone())
            .collect();
        let ranked = rank_descending_by_cosine(query_embedding, &candidates)?;

        Ok(ranked
            .into_iter()
            .take(k)
            .map(|(idx, score)| ChunkSearchResult {
                entry: self.entries[idx].clone(),
                score,
            })
            .collect())
    }

    /// Serialize the index into `persist_dir` (created if needed).
    pub fn persist(&self, persist_dir: &Path) -> Result<(), ApiError> {
        fs::create_dir_all(persist_dir).map_err(|err| {
            ApiError::Index(format!(
                "Failed to create {}: {}",
                persist_dir.display(),
                err
            ))
        })?;

        let file = IndexFile {
            version: INDEX_VERSION,
            embed_model: self.embed_model.clone(),
            entries: self.entries.clone(),
        };
        let payload = serde_json::to_vec(&file).map_err(ApiError::internal)?;
        let path = persist_dir.join(INDEX_FILE);
        fs::write(&path, payload)
            .map_err(|err| ApiError::Index(format!("Failed to write {}: {}", path.display(), err)))
    }

    /// Deserialize a previously persisted index.
    pub fn load(persist_dir: &Path) -> Result<Self, ApiError> {
        let path = persist_dir.join(INDEX_FILE);
        let raw = fs::read(&path)
            .map_err(|err| ApiError::Index(format!("Failed to read {}: {}", path.display(), err)))?;
        let file: IndexFile = serde_json::from_slice(&raw).map_err(|err| {
            ApiError::Index(format!("Corrupt index at {}: {}", path.display(), err))
        })?;

        if file.version != INDEX_VERSION {
            return Err(ApiError::Index(format!(
                "Unsupported index version {} at {}",
                file.version,
                path.display()
            )));
        }

        Ok(Self::new(file.embed_model, file.entries))
    }
}

/// Build the index if `persist_dir` is absent, otherwise load it.
///
/// Building is the expensive path (remote embedding per chunk); loading
/// never touches the embedding provider. Exactly one of the two happens
/// per process start, and any failure here is fatal to startup.
pub async fn ensure_index(
    config: &AppConfig,
    provider: &dyn LlmProvider,
) -> Result<VectorIndex, ApiError> {
    if config.persist_dir.exists() {
        let index = VectorIndex::load(&config.persist_dir)?;
        if index.embed_model != config.embed_model {
            tracing::warn!(
                "Persisted index was built with {} but {} is configured; \
                 remove {} to rebuild",
                index.embed_model,
                config.embed_model,
                config.persist_dir.display()
            );
        }
        tracing::info!(
            "Loaded index with {} chunks from {}",
            index.len(),
            config.persist_dir.display()
        );
        return Ok(index);
    }

    let text = fs::read_to_string(&config.document_path).map_err(|err| {
        ApiError::Index(format!(
            "Failed to read document {}: {}",
            config.document_path.display(),
            err
        ))
    })?;

    let source = config.document_path.to_string_lossy().to_string();
    let chunks = split_into_chunks(&text, &source, config.chunk_size, config.chunk_overlap);
    if chunks.is_empty() {
        return Err(ApiError::Index(format!(
            "Document {} produced no chunks",
            config.document_path.display()
        )));
    }

    let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
    let embeddings = provider.embed(&texts).await?;
    if embeddings.len() != chunks.len() {
        return Err(ApiError::Index(format!(
            "Embedding count mismatch: {} vectors for {} chunks",
            embeddings.len(),
            chunks.len()
        )));
    }

    let entries = chunks
        .into_iter()
        .zip(embeddings)
        .map(|(chunk, embedding)| IndexEntry {
            chunk_id: Uuid::new_v4().to_string(),
            content: chunk.text,
            source: chunk.source,
            chunk_index: chunk.chunk_index,
            embedding,
        })
        .collect();

    let index = VectorIndex::new(config.embed_model.clone(), entries);
    index.persist(&config.persist_dir)?;
    tracing::info!(
        "Built index with {} chunks, persisted to {}",
        index.len(),
        config.persist_dir.display()
    );

    Ok(index)
}
