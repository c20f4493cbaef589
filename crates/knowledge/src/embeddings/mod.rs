//! Embedding providers.
//!
//! The same provider configuration must be used to build the index and to
//! embed queries; the index manifest records it so mismatches are caught at
//! startup.

pub mod config;
pub mod provider;
pub mod providers;

pub use config::EmbeddingConfig;
pub use provider::{create_provider, EmbeddingProvider};
