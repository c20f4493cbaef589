//! LLM provider factory.
//!
//! Resolves a provider name plus connection settings into a shared client.

use crate::client::LlmClient;
use crate::providers::{OllamaClient, OpenAiClient};
use crate::types::ProviderType;
use ragassist_core::{AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("ollama", "openai")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - API key, required by providers that authenticate
/// * `timeout` - Per-request timeout
///
/// # Errors
/// Returns a configuration error if the provider is unknown or a required
/// API key is missing.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
    timeout: Duration,
) -> AppResult<Arc<dyn LlmClient>> {
    let provider_type = ProviderType::parse(provider)
        .ok_or_else(|| AppError::Config(format!("Unknown LLM provider: {}", provider)))?;
    let base_url = endpoint.unwrap_or(provider_type.default_endpoint());

    tracing::debug!("Creating {} client for {}", provider_type.as_str(), base_url);

    match provider_type {
        ProviderType::Ollama => Ok(Arc::new(OllamaClient::new(base_url, timeout)?)),
        ProviderType::OpenAI => {
            let api_key = api_key.filter(|k| !k.is_empty()).ok_or_else(|| {
                AppError::Config("OpenAI provider requires API key".to_string())
            })?;
            Ok(Arc::new(OpenAiClient::new(base_url, api_key, timeout)?))
        }
    }
}
