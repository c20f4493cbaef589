//! LLM integration crate for the RAG assistant.
//!
//! Provides a provider-agnostic completion interface used by answer
//! synthesis when a language model is configured.
//!
//! # Providers
//! - **Ollama**: Local LLM runtime
//! - **OpenAI**: Chat completions API (and compatible servers)
//!
//! # Example
//! ```no_run
//! use ragassist_llm::{create_client, LlmRequest};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_client("ollama", None, None, Duration::from_secs(60))?;
//! let request = LlmRequest::new("Hello, world!", "llama3.2");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::{OllamaClient, OpenAiClient};
pub use types::ProviderType;
