//! Index maintenance command handlers.

use clap::Args;
use ragassist_core::{config::AppConfig, AppResult};
use ragassist_knowledge::LearnOptions;
use std::path::PathBuf;

/// Embed documents and write the vector index
#[derive(Args, Debug)]
pub struct BuildIndexCommand {
    /// Documents directory (default: configured docs dir)
    #[arg(long)]
    pub docs: Option<PathBuf>,

    /// Clear the index before building
    #[arg(long)]
    pub reset: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl BuildIndexCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing build-index command");

        let options = LearnOptions {
            docs_dir: self.docs.clone(),
            reset: self.reset,
        };
        let stats = ragassist_knowledge::learn(config, options).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            println!(
                "Indexed {} documents ({} chunks, {} bytes) in {:.2}s",
                stats.sources_count, stats.chunks_count, stats.bytes_processed, stats.duration_secs
            );
            if stats.skipped_count > 0 {
                println!("Skipped {} unreadable files", stats.skipped_count);
            }
        }

        Ok(())
    }
}

/// Show vector index statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let stats = ragassist_knowledge::stats(config)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
            return Ok(());
        }

        println!("Vector store: {}", config.store_path().display());
        println!("  Sources: {}", stats.sources_count);
        println!("  Chunks: {}", stats.chunks_count);
        println!("  DB size: {} bytes", stats.db_size_bytes);
        if let Some(manifest) = stats.manifest {
            println!(
                "  Embeddings: {}/{} ({} dims)",
                manifest.provider, manifest.model, manifest.dimensions
            );
            if let Some(built_at) = manifest.built_at {
                println!("  Built: {}", built_at);
            }
        }

        Ok(())
    }
}

/// Delete the vector store
#[derive(Args, Debug)]
pub struct CleanCommand {}

impl CleanCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        ragassist_knowledge::clean(config)?;
        println!("Removed vector store at {}", config.store_path().display());
        Ok(())
    }
}
