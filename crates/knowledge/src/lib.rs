//! Knowledge base and question answering.
//!
//! Documents under the docs directory are parsed, chunked, embedded and
//! stored in a local SQLite vector index. [`open_assistant`] wires that
//! index into the [`rag::Assistant`] pipeline used by the CLI and server.

pub mod chunker;
pub mod config;
pub mod embeddings;
pub mod index;
pub mod parser;
pub mod rag;
pub mod retriever;
pub mod types;
pub mod vector_index;

pub use rag::{AnswerMode, Assistant, CandidateChunk, QuestionType, RagResponse, SourceRef};
pub use retriever::{ChunkRetriever, IndexRetriever, StaticRetriever};
pub use types::{
    BaseStats, ChunkPreview, IngestReport, KnowledgeBaseConfig, KnowledgeChunk, KnowledgeSource,
    LearnOptions, LearnStats,
};

use chrono::Utc;
use embeddings::{create_provider, EmbeddingConfig, EmbeddingProvider};
use index::SqliteIndex;
use parser::ParsedPage;
use ragassist_core::{AppConfig, AppError, AppResult};
use rag::GeneratedAnswer;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use vector_index::VectorIndex;
use walkdir::WalkDir;

/// Characters shown per chunk preview during ingestion.
const INGEST_PREVIEW_CHARS: usize = 200;

/// A parsed document ready for chunking.
struct LoadedDocument {
    path: PathBuf,
    content_type: parser::ContentType,
    pages: Vec<ParsedPage>,
}

impl LoadedDocument {
    fn size_bytes(&self) -> u64 {
        self.pages.iter().map(|p| p.text.len() as u64).sum()
    }
}

/// Load and parse every document under `docs_dir`.
///
/// Hidden files are ignored and unparseable files are skipped with a
/// warning. Returns the documents in path order plus the skipped count.
fn load_documents(docs_dir: &Path) -> AppResult<(Vec<LoadedDocument>, u32)> {
    if !docs_dir.is_dir() {
        return Err(AppError::Config(format!(
            "Documents directory not found: {}",
            docs_dir.display()
        )));
    }

    let mut documents = Vec::new();
    let mut skipped = 0u32;

    for entry in WalkDir::new(docs_dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        match parser::parse_file(path) {
            Ok(pages) if pages.is_empty() => {
                tracing::debug!("Skipping empty document {:?}", path);
            }
            Ok(pages) => documents.push(LoadedDocument {
                path: path.to_path_buf(),
                content_type: parser::ContentType::from_path(path),
                pages,
            }),
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", path, e);
                skipped += 1;
            }
        }
    }

    tracing::info!(
        "Loaded {} documents from {:?} ({} skipped)",
        documents.len(),
        docs_dir,
        skipped
    );

    Ok((documents, skipped))
}

/// Stable source id derived from the document path.
fn source_id(path: &Path) -> String {
    let digest = Sha256::digest(path.to_string_lossy().as_bytes());
    format!("{:x}", digest)[..16].to_string()
}

fn embedding_config(config: &AppConfig) -> EmbeddingConfig {
    EmbeddingConfig::from_settings(&config.embedding)
}

fn build_embedder(config: &AppConfig) -> AppResult<Arc<dyn EmbeddingProvider>> {
    let api_key = config.resolve_api_key(config.embedding.api_key_env.as_deref());
    create_provider(&embedding_config(config), api_key.as_deref())
}

/// Fail when stored vectors were produced by a different embedder.
fn check_manifest(config: &AppConfig, manifest: &KnowledgeBaseConfig) -> AppResult<()> {
    EmbeddingConfig::from_manifest(manifest)
        .validate_consistency(&embedding_config(config))
        .map_err(|e| {
            AppError::Config(format!(
                "Index was built with a different embedder ({}). Rebuild with 'ragassist build-index --reset'",
                e
            ))
        })
}

/// Load and chunk documents without embedding them.
///
/// Returns counts plus previews of the first `preview_count` chunks.
pub fn preview(
    config: &AppConfig,
    docs_dir: Option<&Path>,
    preview_count: usize,
) -> AppResult<IngestReport> {
    let docs_dir = docs_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.docs_path());
    let (documents, _) = load_documents(&docs_dir)?;

    let mut chunks_count = 0u32;
    let mut previews = Vec::new();

    for doc in &documents {
        let path = doc.path.to_string_lossy();
        let chunks = chunker::chunk_pages(
            &source_id(&doc.path),
            &path,
            &doc.pages,
            config.retrieval.chunk_size,
            config.retrieval.chunk_overlap,
        )?;

        chunks_count += chunks.len() as u32;

        for chunk in chunks {
            if previews.len() >= preview_count {
                break;
            }
            previews.push(ChunkPreview {
                source: path.to_string(),
                page: chunk
                    .metadata
                    .get("page")
                    .and_then(|p| p.as_u64())
                    .map(|p| p as u32),
                text: chunk
                    .text
                    .chars()
                    .take(INGEST_PREVIEW_CHARS)
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect(),
            });
        }
    }

    Ok(IngestReport {
        documents_count: documents.len() as u32,
        chunks_count,
        previews,
    })
}

/// Build or refresh the vector index from the docs directory.
pub async fn learn(config: &AppConfig, options: LearnOptions) -> AppResult<LearnStats> {
    let start = Instant::now();
    config.validate()?;

    let docs_dir = options.docs_dir.clone().unwrap_or_else(|| config.docs_path());
    let store_dir = config.store_path();
    tracing::info!("Building index from {:?} into {:?}", docs_dir, store_dir);

    if !options.reset {
        if let Some(manifest) = config::load_manifest(&store_dir)? {
            check_manifest(config, &manifest)?;
        }
    }

    let (documents, skipped_count) = load_documents(&docs_dir)?;

    let embedder = build_embedder(config)?;
    let batch_size = embedding_config(config).batch_size.max(1);
    let index = SqliteIndex::open(&config::get_index_path(&store_dir))?;

    if options.reset {
        tracing::info!("Resetting vector index");
        index.reset()?;
    }

    let mut sources_count = 0u32;
    let mut chunks_count = 0u32;
    let mut bytes_processed = 0u64;
    let mut indexed_ids = Vec::with_capacity(documents.len());

    for doc in &documents {
        let id = source_id(&doc.path);
        indexed_ids.push(id.clone());
        let path = doc.path.to_string_lossy();
        let candidates = chunker::chunk_pages(
            &id,
            &path,
            &doc.pages,
            config.retrieval.chunk_size,
            config.retrieval.chunk_overlap,
        )?;

        let size_bytes = doc.size_bytes();
        index.upsert_source(&KnowledgeSource {
            id: id.clone(),
            path: doc.path.clone(),
            content_type: doc.content_type.as_str().to_string(),
            learned_at: Utc::now(),
            size_bytes,
        })?;

        for batch in candidates.chunks(batch_size) {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            let embeddings = embedder.embed_batch(&texts).await?;

            let chunks: Vec<KnowledgeChunk> = batch
                .iter()
                .zip(embeddings)
                .map(|(candidate, embedding)| KnowledgeChunk {
                    id: uuid::Uuid::new_v4().to_string(),
                    source_id: candidate.source_id.clone(),
                    position: candidate.position,
                    text: candidate.text.clone(),
                    embedding: Some(embedding),
                    metadata: candidate.metadata.clone(),
                })
                .collect();

            index.upsert_chunks(&chunks)?;
            chunks_count += chunks.len() as u32;
        }

        tracing::debug!("Indexed {:?}: {} chunks", doc.path, candidates.len());
        sources_count += 1;
        bytes_processed += size_bytes;
    }

    // Documents removed from the docs directory since the last build.
    index.retain_sources(&indexed_ids)?;

    config::save_manifest(
        &store_dir,
        &KnowledgeBaseConfig {
            provider: embedder.provider_name().to_string(),
            model: embedder.model_name().to_string(),
            dimensions: embedder.dimensions(),
            chunk_size: config.retrieval.chunk_size,
            chunk_overlap: config.retrieval.chunk_overlap,
            built_at: Some(Utc::now()),
        },
    )?;

    let duration = start.elapsed();
    tracing::info!(
        "Index built: {} sources, {} chunks, {} bytes in {:.2}s",
        sources_count,
        chunks_count,
        bytes_processed,
        duration.as_secs_f64()
    );

    Ok(LearnStats {
        sources_count,
        chunks_count,
        skipped_count,
        bytes_processed,
        duration_secs: duration.as_secs_f64(),
    })
}

/// Statistics for the vector index.
pub fn stats(config: &AppConfig) -> AppResult<BaseStats> {
    let store_dir = config.store_path();
    let index_path = config::get_index_path(&store_dir);
    if !index_path.exists() {
        return Err(AppError::Knowledge(format!(
            "No index found at {}. Run 'ragassist build-index' first",
            index_path.display()
        )));
    }

    let index = SqliteIndex::open(&index_path)?;
    let (sources_count, chunks_count) = index.stats()?;
    let db_size_bytes = std::fs::metadata(&index_path).map(|m| m.len()).unwrap_or(0);

    Ok(BaseStats {
        sources_count,
        chunks_count,
        db_size_bytes,
        manifest: config::load_manifest(&store_dir)?,
    })
}

/// Delete the vector store (index and manifest).
pub fn clean(config: &AppConfig) -> AppResult<()> {
    let store_dir = config.store_path();
    if !store_dir.exists() {
        return Err(AppError::Knowledge(format!(
            "No vector store at {}",
            store_dir.display()
        )));
    }

    std::fs::remove_dir_all(&store_dir)?;
    tracing::info!("Removed vector store {:?}", store_dir);
    Ok(())
}

/// Build the answer mode from configuration.
///
/// With no language model configured answers are extractive.
pub fn answer_mode(config: &AppConfig) -> AppResult<AnswerMode> {
    let Some(llm) = config.llm.as_ref() else {
        return Ok(AnswerMode::Extractive);
    };

    let api_key = config.resolve_api_key(llm.api_key_env.as_deref());
    let client = ragassist_llm::create_client(
        &llm.provider,
        llm.endpoint.as_deref(),
        api_key.as_deref(),
        Duration::from_secs(llm.timeout_secs),
    )?;

    Ok(AnswerMode::Generated(GeneratedAnswer {
        client,
        model: llm.model.clone(),
        temperature: llm.temperature,
        max_tokens: llm.max_tokens,
        prompt: ragassist_prompt::resolve_answer_prompt(&config.workspace)?,
    }))
}

/// Open the assistant over the built index.
///
/// Fails with a configuration error when the index is missing, was built
/// with a different embedder, or the embedder cannot be reached.
pub async fn open_assistant(config: &AppConfig) -> AppResult<Assistant> {
    config.validate()?;

    let store_dir = config.store_path();
    let index_path = config::get_index_path(&store_dir);
    if !index_path.exists() {
        return Err(AppError::Config(format!(
            "No index found at {}. Run 'ragassist build-index' first",
            index_path.display()
        )));
    }

    match config::load_manifest(&store_dir)? {
        Some(manifest) => check_manifest(config, &manifest)?,
        None => tracing::warn!("Index has no manifest; embedder consistency not checked"),
    }

    let embedder = build_embedder(config)?;
    embedder.embed("health check").await.map_err(|e| {
        AppError::Config(format!(
            "Embedding provider '{}' is not usable: {}",
            embedder.provider_name(),
            e
        ))
    })?;

    let index: Arc<dyn VectorIndex> = Arc::new(SqliteIndex::open(&index_path)?);
    let retriever = Arc::new(IndexRetriever::new(embedder, index));
    let mode = answer_mode(config)?;

    tracing::info!("Assistant ready ({} answers)", mode.name());
    Ok(Assistant::new(retriever, mode, config.retrieval.top_k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, AppConfig) {
        let temp = TempDir::new().unwrap();
        let docs = temp.path().join("data").join("docs");
        fs::create_dir_all(&docs).unwrap();

        fs::write(
            docs.join("ml_basics.txt"),
            "Machine learning is a field of artificial intelligence. \
             Supervised learning trains models on labelled examples.",
        )
        .unwrap();
        fs::write(
            docs.join("cloud.md"),
            "# Docker\n\nDocker packages applications into containers.\n\n\
             # Kubernetes\n\nKubernetes orchestrates containers across nodes.",
        )
        .unwrap();
        fs::write(docs.join(".hidden.txt"), "should be ignored").unwrap();

        let config = AppConfig {
            workspace: temp.path().to_path_buf(),
            ..AppConfig::default()
        };
        (temp, config)
    }

    #[test]
    fn test_preview_counts_documents() {
        let (_temp, config) = setup();
        let report = preview(&config, None, 1).unwrap();

        assert_eq!(report.documents_count, 2);
        assert!(report.chunks_count >= 2);
        assert_eq!(report.previews.len(), 1);
        assert!(report.previews[0].text.chars().count() <= INGEST_PREVIEW_CHARS);
    }

    #[test]
    fn test_preview_text_is_single_line() {
        let (temp, config) = setup();
        fs::write(
            temp.path().join("data").join("docs").join("notes.txt"),
            "first line\r\nsecond line\nthird line",
        )
        .unwrap();

        let report = preview(&config, None, 10).unwrap();
        let notes = report
            .previews
            .iter()
            .find(|p| p.source.ends_with("notes.txt"))
            .unwrap();
        assert!(notes.text.starts_with("first line"));
        assert!(notes.text.contains("third line"));
        assert!(report
            .previews
            .iter()
            .all(|p| !p.text.contains('\n') && !p.text.contains('\r')));
    }

    #[test]
    fn test_missing_docs_dir() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig {
            workspace: temp.path().to_path_buf(),
            ..AppConfig::default()
        };
        assert!(matches!(
            preview(&config, None, 3),
            Err(AppError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_learn_then_ask() {
        let (_temp, config) = setup();

        let learned = learn(&config, LearnOptions::default()).await.unwrap();
        assert_eq!(learned.sources_count, 2);
        assert!(learned.chunks_count >= 2);

        let stats = stats(&config).unwrap();
        assert_eq!(stats.sources_count, 2);
        assert_eq!(stats.manifest.unwrap().provider, "trigram");

        let assistant = open_assistant(&config).await.unwrap();
        assert_eq!(assistant.mode().name(), "extractive");

        let response = assistant.ask("What is machine learning?").await.unwrap();
        assert_eq!(response.question_type, QuestionType::Technical);
        assert!(response.source_count >= 1);
        assert!(response
            .sources
            .iter()
            .any(|s| s.source == "ml_basics.txt"));
    }

    #[tokio::test]
    async fn test_relearn_replaces_chunks() {
        let (_temp, config) = setup();

        let first = learn(&config, LearnOptions::default()).await.unwrap();
        learn(&config, LearnOptions::default()).await.unwrap();

        let stats = stats(&config).unwrap();
        assert_eq!(stats.chunks_count, first.chunks_count);
    }

    #[tokio::test]
    async fn test_relearn_drops_deleted_documents() {
        let (temp, config) = setup();
        learn(&config, LearnOptions::default()).await.unwrap();

        fs::remove_file(temp.path().join("data").join("docs").join("ml_basics.txt")).unwrap();
        let relearned = learn(&config, LearnOptions::default()).await.unwrap();
        assert_eq!(relearned.sources_count, 1);

        let stats = stats(&config).unwrap();
        assert_eq!(stats.sources_count, 1);
        assert_eq!(stats.chunks_count, relearned.chunks_count);

        let assistant = open_assistant(&config).await.unwrap();
        let response = assistant.ask("What is machine learning?").await.unwrap();
        assert!(response.sources.iter().all(|s| s.source != "ml_basics.txt"));
    }

    #[tokio::test]
    async fn test_embedder_mismatch_requires_reset() {
        let (_temp, mut config) = setup();
        learn(&config, LearnOptions::default()).await.unwrap();

        config.embedding.dimensions = 128;
        let err = open_assistant(&config).await.err().unwrap();
        assert!(matches!(err, AppError::Config(_)));

        let err = learn(&config, LearnOptions::default()).await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let rebuilt = learn(
            &config,
            LearnOptions {
                reset: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(rebuilt.sources_count, 2);
    }

    #[tokio::test]
    async fn test_custom_trigram_model_reopens() {
        let (_temp, mut config) = setup();
        config.embedding.model = "trigram-v2".to_string();

        learn(
            &config,
            LearnOptions {
                reset: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let stats = stats(&config).unwrap();
        assert_eq!(stats.manifest.unwrap().model, "trigram-v2");
        assert!(open_assistant(&config).await.is_ok());
        assert!(learn(&config, LearnOptions::default()).await.is_ok());
    }

    #[tokio::test]
    async fn test_open_without_index() {
        let (_temp, config) = setup();
        let err = open_assistant(&config).await.err().unwrap();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn test_clean_removes_store() {
        let (_temp, config) = setup();
        learn(&config, LearnOptions::default()).await.unwrap();

        clean(&config).unwrap();
        assert!(!config.store_path().exists());
        assert!(clean(&config).is_err());
    }

    #[test]
    fn test_source_id_is_stable() {
        let a = source_id(Path::new("data/docs/a.md"));
        assert_eq!(a, source_id(Path::new("data/docs/a.md")));
        assert_ne!(a, source_id(Path::new("data/docs/b.md")));
        assert_eq!(a.len(), 16);
    }
}
