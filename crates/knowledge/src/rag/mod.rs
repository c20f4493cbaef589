//! Question answering: routing, relevance filtering and answer synthesis.

pub mod assistant;
pub mod relevance;
pub mod responder;
pub mod router;
pub mod synthesizer;
pub mod types;
pub mod vocabulary;

pub use assistant::{Assistant, DEFAULT_TOP_K};
pub use synthesizer::{AnswerMode, GeneratedAnswer};
pub use types::{Answer, CandidateChunk, QuestionType, RagResponse, SourceRef};
