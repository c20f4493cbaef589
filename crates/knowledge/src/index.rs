//! SQLite-backed vector index.
//!
//! Embeddings are stored as little-endian `f32` blobs and scored with
//! cosine similarity in process. Corpora here are small technical doc sets,
//! so a full scan per query is acceptable.

use crate::types::{KnowledgeChunk, KnowledgeSource};
use crate::vector_index::VectorIndex;
use ragassist_core::{AppError, AppResult};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS sources (
    id TEXT PRIMARY KEY,
    path TEXT NOT NULL,
    content_type TEXT NOT NULL,
    learned_at TEXT NOT NULL,
    size_bytes INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS chunks (
    id TEXT PRIMARY KEY,
    source_id TEXT NOT NULL,
    position INTEGER NOT NULL,
    text TEXT NOT NULL,
    embedding BLOB NOT NULL,
    metadata TEXT,
    FOREIGN KEY (source_id) REFERENCES sources(id)
);

CREATE INDEX IF NOT EXISTS idx_chunks_source ON chunks(source_id);
"#;

/// Vector index stored in a single SQLite file.
pub struct SqliteIndex {
    conn: Mutex<Connection>,
}

impl SqliteIndex {
    /// Open (or create) the index at `db_path`.
    pub fn open(db_path: &Path) -> AppResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Knowledge(format!("Failed to create index directory: {}", e))
            })?;
        }

        let conn = Connection::open(db_path)
            .map_err(|e| AppError::Knowledge(format!("Failed to open SQLite index: {}", e)))?;
        Self::init(conn)
    }

    /// In-memory index, used by tests.
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::Knowledge(format!("Failed to open SQLite index: {}", e)))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> AppResult<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| AppError::Knowledge(format!("Failed to create tables: {}", e)))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::Knowledge("Index lock poisoned".to_string()))
    }
}

fn insert_chunk(conn: &Connection, chunk: &KnowledgeChunk) -> AppResult<()> {
    let embedding = chunk
        .embedding
        .as_deref()
        .ok_or_else(|| AppError::Knowledge(format!("Chunk {} missing embedding", chunk.id)))?;

    let metadata_json = serde_json::to_string(&chunk.metadata)?;

    conn.execute(
        "INSERT OR REPLACE INTO chunks (id, source_id, position, text, embedding, metadata)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            chunk.id,
            chunk.source_id,
            chunk.position as i64,
            chunk.text,
            embedding_to_bytes(embedding),
            metadata_json,
        ],
    )
    .map_err(|e| AppError::Knowledge(format!("Failed to insert chunk: {}", e)))?;

    Ok(())
}

impl VectorIndex for SqliteIndex {
    fn upsert_source(&self, source: &KnowledgeSource) -> AppResult<()> {
        let conn = self.lock()?;

        conn.execute("DELETE FROM chunks WHERE source_id = ?1", params![source.id])
            .map_err(|e| AppError::Knowledge(format!("Failed to clear source chunks: {}", e)))?;

        conn.execute(
            "INSERT OR REPLACE INTO sources (id, path, content_type, learned_at, size_bytes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                source.id,
                source.path.to_string_lossy(),
                source.content_type,
                source.learned_at.to_rfc3339(),
                source.size_bytes as i64,
            ],
        )
        .map_err(|e| AppError::Knowledge(format!("Failed to insert source: {}", e)))?;

        Ok(())
    }

    fn upsert_chunk(&self, chunk: &KnowledgeChunk) -> AppResult<()> {
        let conn = self.lock()?;
        insert_chunk(&conn, chunk)
    }

    fn upsert_chunks(&self, chunks: &[KnowledgeChunk]) -> AppResult<()> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| AppError::Knowledge(format!("Failed to begin transaction: {}", e)))?;

        for chunk in chunks {
            insert_chunk(&tx, chunk)?;
        }

        tx.commit()
            .map_err(|e| AppError::Knowledge(format!("Failed to commit chunks: {}", e)))
    }

    fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> AppResult<Vec<(KnowledgeChunk, f32)>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT id, source_id, position, text, embedding, metadata FROM chunks")
            .map_err(|e| AppError::Knowledge(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                let embedding_bytes: Vec<u8> = row.get(4)?;
                let metadata_json: Option<String> = row.get(5)?;
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                    embedding_bytes,
                    metadata_json,
                ))
            })
            .map_err(|e| AppError::Knowledge(format!("Failed to query chunks: {}", e)))?;

        let mut results = Vec::new();
        for row in rows {
            let (id, source_id, position, text, bytes, metadata_json) =
                row.map_err(|e| AppError::Knowledge(format!("Failed to read chunk: {}", e)))?;

            let embedding = bytes_to_embedding(&bytes)?;
            let score = cosine_similarity(query_embedding, &embedding);
            let metadata = match metadata_json {
                Some(json) => serde_json::from_str(&json)?,
                None => serde_json::Value::Null,
            };

            results.push((
                KnowledgeChunk {
                    id,
                    source_id,
                    position: position as u32,
                    text,
                    embedding: Some(embedding),
                    metadata,
                },
                score,
            ));
        }

        results.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(top_k);

        tracing::debug!("Retrieved {} chunks (top-{})", results.len(), top_k);
        Ok(results)
    }

    fn stats(&self) -> AppResult<(u32, u32)> {
        let conn = self.lock()?;
        let count = |table: &str| -> AppResult<u32> {
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|v| v as u32)
            .map_err(|e| AppError::Knowledge(format!("Failed to count {}: {}", table, e)))
        };

        Ok((count("sources")?, count("chunks")?))
    }

    fn retain_sources(&self, keep: &[String]) -> AppResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| AppError::Knowledge(format!("Failed to begin transaction: {}", e)))?;

        let stale: Vec<String> = {
            let mut stmt = tx
                .prepare("SELECT id FROM sources")
                .map_err(|e| AppError::Knowledge(format!("Failed to prepare query: {}", e)))?;
            let ids = stmt
                .query_map([], |row| row.get::<_, String>(0))
                .map_err(|e| AppError::Knowledge(format!("Failed to query sources: {}", e)))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| AppError::Knowledge(format!("Failed to read source: {}", e)))?;
            ids.into_iter().filter(|id| !keep.contains(id)).collect()
        };

        for id in &stale {
            tx.execute("DELETE FROM chunks WHERE source_id = ?1", params![id])
                .map_err(|e| AppError::Knowledge(format!("Failed to remove chunks: {}", e)))?;
            tx.execute("DELETE FROM sources WHERE id = ?1", params![id])
                .map_err(|e| AppError::Knowledge(format!("Failed to remove source: {}", e)))?;
        }

        tx.commit()
            .map_err(|e| AppError::Knowledge(format!("Failed to commit removal: {}", e)))?;

        if !stale.is_empty() {
            tracing::info!("Removed {} stale sources from index", stale.len());
        }
        Ok(stale.len())
    }

    fn reset(&self) -> AppResult<()> {
        let conn = self.lock()?;
        conn.execute_batch("DELETE FROM chunks; DELETE FROM sources;")
            .map_err(|e| AppError::Knowledge(format!("Failed to reset index: {}", e)))?;

        tracing::info!("Reset vector index");
        Ok(())
    }
}

fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn bytes_to_embedding(bytes: &[u8]) -> AppResult<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(AppError::Knowledge(
            "Invalid embedding bytes length".to_string(),
        ));
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

/// Cosine similarity; 0.0 for mismatched or zero vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
