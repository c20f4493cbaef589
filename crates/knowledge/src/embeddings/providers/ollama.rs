//! Ollama embedding provider.
//!
//! Calls `/api/embeddings` once per text with bounded retries.

use crate::embeddings::{EmbeddingConfig, EmbeddingProvider};
use ragassist_core::{AppError, AppResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const EMBEDDING_ENDPOINT: &str = "/api/embeddings";

/// Maximum attempts per text
const MAX_RETRIES: u32 = 3;

const INITIAL_BACKOFF_MS: u64 = 100;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Ollama embedding provider.
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    dimensions: usize,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl OllamaProvider {
    /// Create a provider from configuration. No request is made here.
    pub fn new(config: &EmbeddingConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                AppError::Knowledge(format!("Failed to create HTTP client for Ollama: {}", e))
            })?;

        let base_url = config
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            base_url,
            model: config.model.clone(),
            dimensions: config.dimensions,
        })
    }

    #[instrument(skip(self, text), fields(text_len = text.len(), model = %self.model))]
    async fn embed_with_retries(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut attempt = 0;

        loop {
            match self.embed_single(text).await {
                Ok(embedding) => return Ok(embedding),
                Err(e) => {
                    attempt += 1;
                    if attempt >= MAX_RETRIES {
                        return Err(e);
                    }

                    let backoff_ms = INITIAL_BACKOFF_MS * 2_u64.pow(attempt);
                    warn!(
                        "Embedding failed (attempt {}/{}), retrying in {}ms: {}",
                        attempt, MAX_RETRIES, backoff_ms, e
                    );
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                }
            }
        }
    }

    async fn embed_single(&self, text: &str) -> AppResult<Vec<f32>> {
        let url = format!("{}{}", self.base_url, EMBEDDING_ENDPOINT);

        let response = self
            .client
            .post(&url)
            .json(&EmbeddingRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .await
            .map_err(|e| AppError::Knowledge(format!("Failed to send request to Ollama: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ErrorResponse>(&error_text)
                .map(|e| e.error)
                .unwrap_or(error_text);

            return Err(AppError::Knowledge(format!(
                "Ollama API error ({}): {}",
                status, message
            )));
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| AppError::Knowledge(format!("Failed to parse Ollama response: {}", e)))?;

        if body.embedding.len() != self.dimensions {
            return Err(AppError::Knowledge(format!(
                "Ollama model '{}' returned {} dimensions, expected {}",
                self.model,
                body.embedding.len(),
                self.dimensions
            )));
        }

        Ok(body.embedding)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        debug!("Embedding batch of {} texts with Ollama", texts.len());

        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            if text.trim().is_empty() {
                embeddings.push(vec![0.0; self.dimensions]);
                continue;
            }
            embeddings.push(self.embed_with_retries(text).await?);
        }

        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: Option<&str>) -> EmbeddingConfig {
        EmbeddingConfig {
            provider: "ollama".to_string(),
            model: "nomic-embed-text".to_string(),
            dimensions: 768,
            endpoint: endpoint.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_endpoint() {
        let provider = OllamaProvider::new(&config(None)).unwrap();
        assert_eq!(provider.base_url, DEFAULT_OLLAMA_URL);
        assert_eq!(provider.dimensions(), 768);
    }

    #[test]
    fn test_custom_endpoint_trimmed() {
        let provider = OllamaProvider::new(&config(Some("http://gpu-box:11434/"))).unwrap();
        assert_eq!(provider.base_url, "http://gpu-box:11434");
    }

    #[tokio::test]
    async fn test_empty_texts_skip_requests() {
        // Nothing listens on this port; blank input must not reach the network
        let provider = OllamaProvider::new(&config(Some("http://127.0.0.1:9"))).unwrap();
        let embeddings = provider
            .embed_batch(&["   ".to_string()])
            .await
            .unwrap();
        assert_eq!(embeddings[0].len(), 768);
    }
}
