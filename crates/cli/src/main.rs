//! RAG Assistant CLI
//!
//! Builds a local vector index over technical documents and answers
//! questions from it, interactively or over HTTP.

mod commands;

use clap::{Parser, Subcommand};
use commands::{
    AskCommand, BuildIndexCommand, ChatCommand, CleanCommand, IngestCommand, ServeCommand,
    StatsCommand,
};
use ragassist_core::{config::AppConfig, logging, AppResult, Backend};
use std::path::PathBuf;

/// RAG Assistant - answers technical questions from your documents
#[derive(Parser, Debug)]
#[command(name = "ragassist")]
#[command(about = "Technical question answering over a local document index", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "RAG_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "RAG_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Backend preset (local, openai)
    #[arg(short, long, global = true, value_parser = parse_backend)]
    backend: Option<Backend>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load and chunk documents without indexing
    Ingest(IngestCommand),

    /// Embed documents into the vector index
    BuildIndex(BuildIndexCommand),

    /// Answer a single question
    Ask(AskCommand),

    /// Interactive question loop
    Chat(ChatCommand),

    /// Start the HTTP API
    Serve(ServeCommand),

    /// Show vector index statistics
    Stats(StatsCommand),

    /// Delete the vector index
    Clean(CleanCommand),
}

fn parse_backend(value: &str) -> Result<Backend, String> {
    Backend::parse(value)
        .ok_or_else(|| format!("unknown backend '{}' (expected local or openai)", value))
}

/// Environment lookup with CLI flags layered on top.
///
/// Workspace, config file and backend decide what gets loaded, so they are
/// seen by the loader before file and env overrides are applied.
fn cli_env<'a, F>(cli: &'a Cli, env: F) -> impl Fn(&str) -> Option<String> + 'a
where
    F: Fn(&str) -> Option<String> + 'a,
{
    move |key| {
        let flag = match key {
            "RAG_WORKSPACE" => cli
                .workspace
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            "RAG_CONFIG" => cli
                .config
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            "RAG_BACKEND" => cli.backend.map(|b| b.as_str().to_string()),
            _ => None,
        };
        flag.or_else(|| env(key))
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = AppConfig::load_with(cli_env(&cli, |key| std::env::var(key).ok()))?
        .with_overrides(cli.log_level.clone(), cli.verbose, cli.no_color, cli.log_json);

    logging::init_logging(config.log_level.as_deref(), config.no_color, config.log_json)?;

    tracing::info!("RAG Assistant CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!(
        "Embeddings: {}/{}, LLM: {}",
        config.embedding.provider,
        config.embedding.model,
        config
            .llm
            .as_ref()
            .map(|l| format!("{}/{}", l.provider, l.model))
            .unwrap_or_else(|| "none".to_string())
    );

    config.ensure_app_dir()?;

    let command_name = match &cli.command {
        Commands::Ingest(_) => "ingest",
        Commands::BuildIndex(_) => "build-index",
        Commands::Ask(_) => "ask",
        Commands::Chat(_) => "chat",
        Commands::Serve(_) => "serve",
        Commands::Stats(_) => "stats",
        Commands::Clean(_) => "clean",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Ingest(cmd) => cmd.execute(&config).await,
        Commands::BuildIndex(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Serve(cmd) => cmd.execute(&config).await,
        Commands::Stats(cmd) => cmd.execute(&config).await,
        Commands::Clean(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
