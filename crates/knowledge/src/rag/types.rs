//! Query-side types of the decision core.

use serde::{Deserialize, Serialize};

/// A chunk returned by retrieval, before relevance filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateChunk {
    /// Chunk text
    pub content: String,

    /// Source identifier, usually a document path
    pub source: String,

    /// Page label when the source is paged
    pub page: Option<String>,
}

impl CandidateChunk {
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
            page: None,
        }
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }
}

/// Question classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Technical,
    General,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Technical => "technical",
            QuestionType::General => "general",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing reference to a chunk that backed an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    /// 1-based position in the answer's source list
    pub id: usize,

    /// File name of the source
    pub source: String,

    /// Page label, or "N/A"
    pub page: String,

    /// First 100 characters of the chunk, on one line
    pub preview: String,
}

/// Synthesized answer with its sources.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<SourceRef>,
}

impl Answer {
    /// Answer with no supporting sources.
    pub fn canned(text: &str) -> Self {
        Self {
            text: text.to_string(),
            sources: Vec::new(),
        }
    }
}

/// Full response to one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagResponse {
    pub question: String,
    pub answer: String,
    pub question_type: QuestionType,
    pub sources: Vec<SourceRef>,
    pub source_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(QuestionType::Technical).unwrap(),
            "technical"
        );
        assert_eq!(QuestionType::General.to_string(), "general");
    }

    #[test]
    fn test_candidate_builder() {
        let chunk = CandidateChunk::new("text", "docs/a.md").with_page("3");
        assert_eq!(chunk.page.as_deref(), Some("3"));
    }
}
