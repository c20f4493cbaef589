//! OpenAI embeddings provider (`/embeddings`).

use crate::embeddings::{EmbeddingConfig, EmbeddingProvider};
use ragassist_core::{AppError, AppResult};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// OpenAI embedding provider.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    dimensions: usize,
    batch_size: usize,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

impl OpenAiProvider {
    pub fn new(config: &EmbeddingConfig, api_key: &str) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Knowledge(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config
                .endpoint
                .as_deref()
                .unwrap_or(DEFAULT_OPENAI_URL)
                .trim_end_matches('/')
                .to_string(),
            api_key: api_key.to_string(),
            model: config.model.clone(),
            dimensions: config.dimensions,
            batch_size: config.batch_size.max(1),
        })
    }

    async fn embed_request(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        let url = format!("{}/embeddings", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({ "model": self.model, "input": texts }))
            .send()
            .await
            .map_err(|e| AppError::Knowledge(format!("Failed to send embedding request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Knowledge(format!(
                "OpenAI embeddings error ({}): {}",
                status, error_text
            )));
        }

        let body: EmbeddingResponse = response.json().await.map_err(|e| {
            AppError::Knowledge(format!("Failed to parse embedding response: {}", e))
        })?;

        order_embeddings(body.data, texts.len(), self.dimensions)
    }
}

/// Restore input order and check shape.
fn order_embeddings(
    mut data: Vec<EmbeddingData>,
    expected: usize,
    dimensions: usize,
) -> AppResult<Vec<Vec<f32>>> {
    if data.len() != expected {
        return Err(AppError::Knowledge(format!(
            "Expected {} embeddings, got {}",
            expected,
            data.len()
        )));
    }

    data.sort_by_key(|d| d.index);

    data.into_iter()
        .map(|d| {
            if d.embedding.len() != dimensions {
                return Err(AppError::Knowledge(format!(
                    "Unexpected embedding dimensions: got {}, expected {}",
                    d.embedding.len(),
                    dimensions
                )));
            }
            Ok(d.embedding)
        })
        .collect()
}

#[async_trait::async_trait]
impl EmbeddingProvider for OpenAiProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.batch_size) {
            tracing::debug!("Requesting {} OpenAI embeddings", batch.len());
            embeddings.extend(self.embed_request(batch).await?);
        }
        Ok(embeddings)
    }
}
