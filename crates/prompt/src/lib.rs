//! Prompt system for the RAG assistant.
//!
//! This crate owns the answer-synthesis prompt:
//! - A built-in instruction template
//! - Optional YAML overrides under `.ragassist/prompts/`
//! - Handlebars template rendering

pub mod builder;
pub mod loader;
pub mod types;

pub use builder::{build_prompt, render_template};
pub use loader::{default_answer_prompt, load_prompt, resolve_answer_prompt, ANSWER_PROMPT_ID};
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptDefinition};
