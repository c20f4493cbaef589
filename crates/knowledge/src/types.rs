//! Knowledge system type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Index manifest recorded when the vector index is built.
///
/// Queries must embed with the same provider, model and dimension that
/// produced the stored vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBaseConfig {
    /// Embedding provider used for the stored vectors
    pub provider: String,

    /// Embedding model used for the stored vectors
    pub model: String,

    /// Embedding vector dimension
    pub dimensions: usize,

    /// Chunk size in characters
    pub chunk_size: usize,

    /// Overlap between chunks in characters
    pub chunk_overlap: usize,

    /// When the index was last built
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub built_at: Option<DateTime<Utc>>,
}

/// A source document recorded in the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeSource {
    /// Stable source identifier derived from the document path
    pub id: String,

    /// Document path
    pub path: PathBuf,

    /// Detected content type ("markdown", "html", "code", "text")
    pub content_type: String,

    /// When this source was indexed
    pub learned_at: DateTime<Utc>,

    /// Size of the extracted text in bytes
    pub size_bytes: u64,
}

/// A text chunk with embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeChunk {
    /// Unique chunk identifier
    pub id: String,

    /// Source document ID
    pub source_id: String,

    /// Position within source
    pub position: u32,

    /// Text content
    pub text: String,

    /// Embedding vector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,

    /// Metadata: `source_path`, `page`, `start`, `end`, `hash`
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Internal chunk candidate before embedding.
#[derive(Debug, Clone)]
pub struct ChunkCandidate {
    pub source_id: String,
    pub position: u32,
    pub text: String,
    pub metadata: serde_json::Value,
}

/// Options for the learn (build-index) operation.
#[derive(Debug, Clone, Default)]
pub struct LearnOptions {
    /// Documents directory; defaults to the configured one
    pub docs_dir: Option<PathBuf>,

    /// Clear the index before learning
    pub reset: bool,
}

/// Statistics from a learn operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnStats {
    /// Number of documents indexed
    pub sources_count: u32,

    /// Number of chunks written
    pub chunks_count: u32,

    /// Files that could not be parsed
    pub skipped_count: u32,

    /// Total bytes of extracted text
    pub bytes_processed: u64,

    /// Duration in seconds
    pub duration_secs: f64,
}

/// Short view of one chunk produced during ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkPreview {
    pub source: String,
    pub page: Option<u32>,
    pub text: String,
}

/// Result of loading and chunking documents without embedding them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    /// Documents loaded
    pub documents_count: u32,

    /// Chunks produced
    pub chunks_count: u32,

    /// Leading chunk previews
    pub previews: Vec<ChunkPreview>,
}

/// Statistics for the vector index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseStats {
    /// Number of sources
    pub sources_count: u32,

    /// Number of chunks
    pub chunks_count: u32,

    /// Database size in bytes
    pub db_size_bytes: u64,

    /// Manifest the index was built with
    pub manifest: Option<KnowledgeBaseConfig>,
}
