//! Embedding provider trait and factory.

use crate::embeddings::config::EmbeddingConfig;
use crate::embeddings::providers::{OllamaProvider, OpenAiProvider, TrigramProvider};
use ragassist_core::{AppError, AppResult};
use std::sync::Arc;

/// Trait for embedding providers.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "trigram", "openai", "ollama")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Generate embeddings for multiple texts in a batch.
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>>;

    /// Generate embedding for a single text (convenience method).
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut results = self.embed_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::Knowledge("No embedding returned".to_string()))
    }
}

/// Create an embedding provider based on configuration.
///
/// `api_key` is required by the `openai` provider and ignored otherwise.
pub fn create_provider(
    config: &EmbeddingConfig,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "trigram" => Ok(Arc::new(TrigramProvider::new(
            config.model.clone(),
            config.dimensions,
        ))),

        "ollama" => Ok(Arc::new(OllamaProvider::new(config)?)),

        "openai" => {
            let api_key = api_key.filter(|k| !k.is_empty()).ok_or_else(|| {
                AppError::Config("OpenAI embedding provider requires API key".to_string())
            })?;
            Ok(Arc::new(OpenAiProvider::new(config, api_key)?))
        }

        _ => Err(AppError::Config(format!(
            "Unknown embedding provider: '{}'. Supported providers: trigram, ollama, openai",
            config.provider
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_trigram_provider() {
        let provider = create_provider(&EmbeddingConfig::default(), None).unwrap();
        assert_eq!(provider.provider_name(), "trigram");
        assert_eq!(provider.model_name(), "trigram-v1");
        assert_eq!(provider.dimensions(), 384);
    }

    #[test]
    fn test_create_ollama_provider() {
        let config = EmbeddingConfig {
            provider: "ollama".to_string(),
            model: "nomic-embed-text".to_string(),
            dimensions: 768,
            ..Default::default()
        };

        let provider = create_provider(&config, None).unwrap();
        assert_eq!(provider.model_name(), "nomic-embed-text");
    }

    #[test]
    fn test_openai_requires_key() {
        let config = EmbeddingConfig {
            provider: "openai".to_string(),
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
            ..Default::default()
        };

        assert!(matches!(
            create_provider(&config, None),
            Err(AppError::Config(_))
        ));
        assert!(create_provider(&config, Some("sk-test")).is_ok());
    }

    #[test]
    fn test_create_unknown_provider() {
        let config = EmbeddingConfig {
            provider: "word2vec".to_string(),
            ..Default::default()
        };

        let err = create_provider(&config, None).unwrap_err();
        assert!(err.to_string().contains("Unknown embedding provider"));
    }

    #[tokio::test]
    async fn test_provider_embed_single() {
        let provider = create_provider(&EmbeddingConfig::default(), None).unwrap();
        let embedding = provider.embed("kubernetes schedules pods").await.unwrap();
        assert_eq!(embedding.len(), 384);
    }
}
