//! Query pipeline shared by the CLI and the HTTP service.

use super::relevance;
use super::router;
use super::synthesizer::{self, AnswerMode};
use super::types::{QuestionType, RagResponse};
use crate::retriever::ChunkRetriever;
use ragassist_core::{AppError, AppResult};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Default number of chunks retrieved per technical question.
pub const DEFAULT_TOP_K: usize = 4;

/// Answers questions against a knowledge base.
pub struct Assistant {
    retriever: Arc<dyn ChunkRetriever>,
    mode: AnswerMode,
    top_k: usize,
}

impl Assistant {
    pub fn new(retriever: Arc<dyn ChunkRetriever>, mode: AnswerMode, top_k: usize) -> Self {
        Self {
            retriever,
            mode,
            top_k: top_k.max(1),
        }
    }

    pub fn mode(&self) -> &AnswerMode {
        &self.mode
    }

    /// Number of chunks available to retrieval.
    pub fn index_chunks(&self) -> AppResult<usize> {
        self.retriever.chunk_count()
    }

    /// Answer one question.
    ///
    /// Blank questions are rejected with [`AppError::Input`]. Language model
    /// failures are returned as [`AppError::Llm`].
    #[instrument(skip(self), fields(mode = self.mode.name()))]
    pub async fn ask(&self, question: &str) -> AppResult<RagResponse> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::Input("Question cannot be empty".to_string()));
        }

        let question_type = router::classify(question);
        debug!(%question_type, "Classified question");

        let relevant = match question_type {
            QuestionType::Technical => {
                let candidates = self.retriever.retrieve(question, self.top_k).await?;
                let retrieved = candidates.len();
                let relevant = relevance::filter(question, candidates);
                debug!(retrieved, relevant = relevant.len(), "Filtered candidates");
                relevant
            }
            QuestionType::General => Vec::new(),
        };

        let answer =
            synthesizer::synthesize(&self.mode, question, question_type, &relevant).await?;

        info!(
            %question_type,
            sources = answer.sources.len(),
            "Answered question"
        );

        Ok(RagResponse {
            question: question.to_string(),
            answer: synthesizer::sanitize(&answer.text),
            question_type,
            source_count: answer.sources.len(),
            sources: answer.sources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::responder::ReplyCategory;
    use crate::rag::types::CandidateChunk;
    use crate::retriever::StaticRetriever;

    fn assistant() -> Assistant {
        let retriever = StaticRetriever::new(vec![
            CandidateChunk::new(
                "Machine learning lets systems learn patterns from data.",
                "data/docs/ml.txt",
            ),
            CandidateChunk::new("Pandas dataframes hold tabular data.", "data/docs/ds.txt"),
        ]);
        Assistant::new(Arc::new(retriever), AnswerMode::Extractive, DEFAULT_TOP_K)
    }

    #[tokio::test]
    async fn test_technical_question_with_evidence() {
        let response = assistant().ask("What is machine learning?").await.unwrap();

        assert_eq!(response.question_type, QuestionType::Technical);
        assert!(response.source_count >= 1);
        assert_eq!(response.sources[0].source, "ml.txt");
        assert!(response.answer.starts_with("Based on my knowledge: "));
    }

    #[tokio::test]
    async fn test_small_talk() {
        let response = assistant().ask("Hello, how are you?").await.unwrap();

        assert_eq!(response.question_type, QuestionType::General);
        assert_eq!(response.source_count, 0);
        assert_eq!(response.answer, ReplyCategory::WellBeing.reply());
    }

    #[tokio::test]
    async fn test_empty_question_rejected() {
        let err = assistant().ask("   ").await.unwrap_err();
        assert!(err.is_input_error());
    }

    #[tokio::test]
    async fn test_technical_question_without_evidence() {
        let response = assistant().ask("What is kubernetes?").await.unwrap();

        assert_eq!(response.question_type, QuestionType::Technical);
        assert_eq!(response.source_count, 0);
        assert_eq!(response.answer, ReplyCategory::Fallback.reply());
    }

    #[tokio::test]
    async fn test_question_is_trimmed() {
        let response = assistant().ask("  What is machine learning?  ").await.unwrap();
        assert_eq!(response.question, "What is machine learning?");
    }

    #[test]
    fn test_index_chunks() {
        assert_eq!(assistant().index_chunks().unwrap(), 2);
    }
}
