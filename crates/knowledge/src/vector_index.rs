//! Vector index abstraction for knowledge chunks.

use crate::types::{KnowledgeChunk, KnowledgeSource};
use ragassist_core::AppResult;

/// Trait for vector index backends.
///
/// Methods take `&self` so one index can be shared behind an `Arc` by
/// concurrent requests; backends handle their own locking.
pub trait VectorIndex: Send + Sync {
    /// Record a source, replacing any chunks it previously owned.
    fn upsert_source(&self, source: &KnowledgeSource) -> AppResult<()>;

    /// Insert or update a chunk with its embedding.
    fn upsert_chunk(&self, chunk: &KnowledgeChunk) -> AppResult<()>;

    /// Insert or update many chunks.
    fn upsert_chunks(&self, chunks: &[KnowledgeChunk]) -> AppResult<()> {
        chunks.iter().try_for_each(|chunk| self.upsert_chunk(chunk))
    }

    /// Top-k chunks by descending similarity to the query embedding.
    fn search(&self, query_embedding: &[f32], top_k: usize)
        -> AppResult<Vec<(KnowledgeChunk, f32)>>;

    /// Returns (sources_count, chunks_count).
    fn stats(&self) -> AppResult<(u32, u32)>;

    /// Remove every source whose id is not in `keep`, with its chunks.
    /// Returns the number of sources removed.
    fn retain_sources(&self, keep: &[String]) -> AppResult<usize>;

    /// Remove all chunks and sources.
    fn reset(&self) -> AppResult<()>;
}
