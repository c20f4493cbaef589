//! Error types for the RAG assistant.
//!
//! A single error enum covers every failure category in the workspace:
//! configuration, I/O, language-model calls, knowledge base operations,
//! prompt rendering, and rejected user input.

use thiserror::Error;

/// Unified error type for the RAG assistant.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (fatal at startup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Language model provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Knowledge base, embedding and retrieval errors
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Prompt template errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Rejected user input (e.g. an empty question)
    #[error("Invalid input: {0}")]
    Input(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Whether this error was caused by the caller rather than the system.
    pub fn is_input_error(&self) -> bool {
        matches!(self, AppError::Input(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
