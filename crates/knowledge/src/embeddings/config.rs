//! Embedding configuration types.

use crate::types::KnowledgeBaseConfig;
use ragassist_core::config::EmbeddingSettings;
use ragassist_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Embedding configuration resolved from application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    /// Provider name: "trigram", "ollama", "openai"
    pub provider: String,

    /// Model identifier (provider-specific)
    pub model: String,

    /// Embedding vector dimensions
    pub dimensions: usize,

    /// Optional API endpoint override
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Maximum batch size for embedding requests
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_batch_size() -> usize {
    64
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "trigram".to_string(),
            model: "trigram-v1".to_string(),
            dimensions: 384,
            endpoint: None,
            batch_size: default_batch_size(),
        }
    }
}

impl EmbeddingConfig {
    /// Build from the application's embedding settings.
    pub fn from_settings(settings: &EmbeddingSettings) -> Self {
        Self {
            provider: settings.provider.clone(),
            model: settings.model.clone(),
            dimensions: settings.dimensions,
            endpoint: settings.endpoint.clone(),
            batch_size: default_batch_size(),
        }
    }

    /// Embedding settings recorded in an index manifest.
    pub fn from_manifest(manifest: &KnowledgeBaseConfig) -> Self {
        Self {
            provider: manifest.provider.clone(),
            model: manifest.model.clone(),
            dimensions: manifest.dimensions,
            ..Self::default()
        }
    }

    /// Validate that another config produces compatible vectors.
    pub fn validate_consistency(&self, other: &Self) -> AppResult<()> {
        if self.provider != other.provider {
            return Err(AppError::Knowledge(format!(
                "Provider mismatch: expected '{}', got '{}'",
                self.provider, other.provider
            )));
        }

        if self.model != other.model {
            return Err(AppError::Knowledge(format!(
                "Model mismatch: expected '{}', got '{}'",
                self.model, other.model
            )));
        }

        if self.dimensions != other.dimensions {
            return Err(AppError::Knowledge(format!(
                "Dimension mismatch: expected {}, got {}",
                self.dimensions, other.dimensions
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.provider, "trigram");
        assert_eq!(config.dimensions, 384);
    }

    #[test]
    fn test_from_settings() {
        let settings = EmbeddingSettings {
            provider: "openai".to_string(),
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
            endpoint: Some("https://proxy.local/v1".to_string()),
            api_key_env: Some("OPENAI_API_KEY".to_string()),
        };

        let config = EmbeddingConfig::from_settings(&settings);
        assert_eq!(config.model, "text-embedding-3-small");
        assert_eq!(config.endpoint.as_deref(), Some("https://proxy.local/v1"));
    }

    #[test]
    fn test_validate_consistency_success() {
        let config = EmbeddingConfig::default();
        assert!(config.validate_consistency(&config.clone()).is_ok());
    }

    #[test]
    fn test_validate_consistency_ignores_endpoint() {
        let config = EmbeddingConfig::default();
        let other = EmbeddingConfig {
            endpoint: Some("http://elsewhere".to_string()),
            ..config.clone()
        };
        assert!(config.validate_consistency(&other).is_ok());
    }

    #[test]
    fn test_validate_consistency_provider_mismatch() {
        let config = EmbeddingConfig::default();
        let other = EmbeddingConfig {
            provider: "openai".to_string(),
            ..config.clone()
        };

        let err = config.validate_consistency(&other).unwrap_err();
        assert!(err.to_string().contains("Provider mismatch"));
    }

    #[test]
    fn test_validate_consistency_dimension_mismatch() {
        let config = EmbeddingConfig::default();
        let other = EmbeddingConfig {
            dimensions: 1536,
            ..config.clone()
        };

        let err = config.validate_consistency(&other).unwrap_err();
        assert!(err.to_string().contains("Dimension mismatch"));
    }
}
