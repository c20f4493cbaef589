//! Serve command handler.

use clap::Args;
use ragassist_core::{config::AppConfig, AppResult};
use std::sync::Arc;

/// Start the HTTP API
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Bind address (default: configured host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port (default: configured port)
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let host = self.host.as_deref().unwrap_or(&config.server.host);
        let port = self.port.unwrap_or(config.server.port);

        let assistant = ragassist_knowledge::open_assistant(config).await?;
        tracing::info!(
            "Serving {} chunks with {} answers",
            assistant.index_chunks()?,
            assistant.mode().name()
        );

        ragassist_server::serve(Arc::new(assistant), host, port).await
    }
}
