//! Ingest command handler.
//!
//! Loads and chunks documents without touching the index, so the corpus
//! can be checked before a build.

use clap::Args;
use ragassist_core::{config::AppConfig, AppResult};

/// Load and chunk documents, printing counts and previews
#[derive(Args, Debug)]
pub struct IngestCommand {
    /// Number of chunk previews to print
    #[arg(long, default_value = "3")]
    pub preview: usize,
}

impl IngestCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ingest command");

        let report = ragassist_knowledge::preview(config, None, self.preview)?;

        println!("Loaded {} documents", report.documents_count);
        println!("Created {} chunks", report.chunks_count);

        for (i, preview) in report.previews.iter().enumerate() {
            let page = preview
                .page
                .map(|p| format!(", page {}", p))
                .unwrap_or_default();
            println!("\nChunk {} ({}{}):", i + 1, preview.source, page);
            println!("{}...", preview.text);
        }

        Ok(())
    }
}
