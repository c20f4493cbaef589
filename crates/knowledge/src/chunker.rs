//! Text chunking with configurable size and overlap.
//!
//! Sizes are measured in characters. Chunk boundaries prefer semantic
//! breaks (paragraphs, sentences, words) as chosen by `text-splitter`.

use crate::parser::ParsedPage;
use crate::types::ChunkCandidate;
use ragassist_core::{AppError, AppResult};
use sha2::{Digest, Sha256};
use text_splitter::{ChunkConfig, TextSplitter};

/// Chunk the pages of one document into overlapping segments.
///
/// Positions run across the whole document. Each candidate's metadata
/// carries `source_path`, `page` (or null), the byte range within its page
/// and a SHA-256 hash of the chunk text.
pub fn chunk_pages(
    source_id: &str,
    source_path: &str,
    pages: &[ParsedPage],
    chunk_size: usize,
    overlap: usize,
) -> AppResult<Vec<ChunkCandidate>> {
    let config = ChunkConfig::new(chunk_size)
        .with_overlap(overlap)
        .map_err(|e| AppError::Knowledge(format!("Invalid chunk configuration: {}", e)))?;
    let splitter = TextSplitter::new(config);

    let mut chunks = Vec::new();
    let mut position = 0u32;

    for page in pages {
        for (start, text) in splitter.chunk_indices(&page.text) {
            if text.trim().is_empty() {
                continue;
            }

            chunks.push(ChunkCandidate {
                source_id: source_id.to_string(),
                position,
                text: text.to_string(),
                metadata: serde_json::json!({
                    "source_path": source_path,
                    "page": page.number,
                    "start": start,
                    "end": start + text.len(),
                    "hash": calculate_hash(text),
                }),
            });
            position += 1;
        }
    }

    tracing::debug!(
        "Chunked {} into {} chunks (size: {}, overlap: {})",
        source_path,
        chunks.len(),
        chunk_size,
        overlap
    );

    Ok(chunks)
}

/// Calculate SHA-256 hash of text.
pub fn calculate_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
