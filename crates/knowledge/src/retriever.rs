//! Chunk retrieval for the question pipeline.

use crate::embeddings::EmbeddingProvider;
use crate::rag::types::CandidateChunk;
use crate::types::KnowledgeChunk;
use crate::vector_index::VectorIndex;
use ragassist_core::{AppError, AppResult};
use std::sync::Arc;

/// Source of candidate chunks for a question.
#[async_trait::async_trait]
pub trait ChunkRetriever: Send + Sync {
    /// At most `k` candidates, most similar first.
    async fn retrieve(&self, query: &str, k: usize) -> AppResult<Vec<CandidateChunk>>;

    /// Number of chunks that can be retrieved.
    fn chunk_count(&self) -> AppResult<usize>;
}

/// Retriever backed by an embedder and a vector index.
pub struct IndexRetriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
}

impl IndexRetriever {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<dyn VectorIndex>) -> Self {
        Self { embedder, index }
    }
}

#[async_trait::async_trait]
impl ChunkRetriever for IndexRetriever {
    async fn retrieve(&self, query: &str, k: usize) -> AppResult<Vec<CandidateChunk>> {
        let query_embedding = self.embedder.embed(query).await?;

        // SQLite scans block, keep them off the async workers.
        let index = Arc::clone(&self.index);
        let hits = tokio::task::spawn_blocking(move || index.search(&query_embedding, k))
            .await
            .map_err(|e| AppError::Knowledge(format!("Search task failed: {}", e)))??;

        tracing::debug!(
            hits = hits.len(),
            top_score = hits.first().map(|(_, s)| *s).unwrap_or(0.0),
            "Vector search complete"
        );

        Ok(hits.into_iter().map(|(chunk, _)| to_candidate(chunk)).collect())
    }

    fn chunk_count(&self) -> AppResult<usize> {
        let (_, chunks) = self.index.stats()?;
        Ok(chunks as usize)
    }
}

fn to_candidate(chunk: KnowledgeChunk) -> CandidateChunk {
    let source = chunk
        .metadata
        .get("source_path")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| chunk.source_id.clone());

    let page = match chunk.metadata.get("page") {
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        _ => None,
    };

    CandidateChunk {
        content: chunk.text,
        source,
        page,
    }
}

/// Retriever over a fixed list of chunks, returned in order.
///
/// Useful for tests and demos that should not touch an index.
#[derive(Debug, Clone, Default)]
pub struct StaticRetriever {
    chunks: Vec<CandidateChunk>,
}

impl StaticRetriever {
    pub fn new(chunks: Vec<CandidateChunk>) -> Self {
        Self { chunks }
    }
}

#[async_trait::async_trait]
impl ChunkRetriever for StaticRetriever {
    async fn retrieve(&self, _query: &str, k: usize) -> AppResult<Vec<CandidateChunk>> {
        Ok(self.chunks.iter().take(k).cloned().collect())
    }

    fn chunk_count(&self) -> AppResult<usize> {
        Ok(self.chunks.len())
    }
}
