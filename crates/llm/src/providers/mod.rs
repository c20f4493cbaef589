//! LLM provider implementations.

pub mod ollama;
pub mod openai;

pub use ollama::OllamaClient;
pub use openai::OpenAiClient;

use ragassist_core::{AppError, AppResult};
use std::time::Duration;

/// Build an HTTP client with a request timeout.
pub(crate) fn http_client(timeout: Duration) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Llm(format!("Failed to build HTTP client: {}", e)))
}
