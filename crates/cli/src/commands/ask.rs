//! Ask and chat command handlers.

use clap::Args;
use ragassist_core::{config::AppConfig, AppResult};
use ragassist_knowledge::{Assistant, RagResponse};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Answer one question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let assistant = ragassist_knowledge::open_assistant(config).await?;
        let response = assistant.ask(&self.question).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            print_response(&response);
        }

        Ok(())
    }
}

/// Interactive question loop
#[derive(Args, Debug)]
pub struct ChatCommand {}

const EXIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

impl ChatCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");

        let assistant = ragassist_knowledge::open_assistant(config).await?;

        println!("RAG Assistant ({} answers)", assistant.mode().name());
        println!("Ask about machine learning, web development, data science or cloud computing.");
        println!("Type 'quit' to exit.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("\nYou: ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!();
                break;
            };

            let question = line.trim();
            if question.is_empty() {
                continue;
            }
            if EXIT_WORDS.contains(&question.to_lowercase().as_str()) {
                break;
            }

            answer_one(&assistant, question).await;
        }

        println!("Goodbye!");
        Ok(())
    }
}

async fn answer_one(assistant: &Assistant, question: &str) {
    match assistant.ask(question).await {
        Ok(response) => print_response(&response),
        Err(e) => {
            tracing::warn!("Question failed: {}", e);
            eprintln!("Error: {}", e);
        }
    }
}

fn print_response(response: &RagResponse) {
    println!("\nAssistant: {}", response.answer);

    if response.sources.is_empty() {
        return;
    }

    println!("\nSources:");
    for source in &response.sources {
        println!(
            "  [{}] {} (page {}): {}",
            source.id, source.source, source.page, source.preview
        );
    }
}
