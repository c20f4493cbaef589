//! Prompt loading: the built-in answer prompt and YAML overrides.
//!
//! A workspace can replace the built-in prompt by placing `<id>.yml` in
//! `.ragassist/prompts/`.

use crate::types::PromptDefinition;
use ragassist_core::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Identifier of the answer-synthesis prompt.
pub const ANSWER_PROMPT_ID: &str = "rag.answer";

const ANSWER_TEMPLATE: &str = "You are a knowledgeable assistant. Answer the question using ONLY the provided context.
Structure your answer clearly with:
1. Direct answer to the question
2. Key supporting details
3. Source references

Question: {{question}}

Context:
{{context}}

Answer:";

/// The built-in answer-synthesis prompt.
pub fn default_answer_prompt() -> PromptDefinition {
    PromptDefinition {
        id: ANSWER_PROMPT_ID.to_string(),
        title: "Grounded technical answer".to_string(),
        api_version: "1.0".to_string(),
        system: None,
        template: ANSWER_TEMPLATE.to_string(),
    }
}

fn prompts_dir(workspace_path: &Path) -> PathBuf {
    workspace_path.join(".ragassist").join("prompts")
}

/// Load a prompt definition by ID from the workspace.
///
/// # Example
/// ```no_run
/// use ragassist_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("."), "rag.answer")?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = prompts_dir(workspace_path).join(format!("{}.yml", prompt_id));

    tracing::debug!("Loading prompt from: {:?}", prompt_file);

    if !prompt_file.exists() {
        return Err(AppError::Prompt(format!(
            "Prompt file not found: {:?}",
            prompt_file
        )));
    }

    let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to read prompt file {:?}: {}",
            prompt_file, e
        ))
    })?;

    let definition: PromptDefinition = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to parse prompt YAML {:?}: {}",
            prompt_file, e
        ))
    })?;

    validate_prompt(&definition)?;

    tracing::info!("Loaded prompt: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// Load the answer prompt, preferring a workspace override.
pub fn resolve_answer_prompt(workspace_path: &Path) -> AppResult<PromptDefinition> {
    let override_file = prompts_dir(workspace_path).join(format!("{}.yml", ANSWER_PROMPT_ID));
    if override_file.exists() {
        load_prompt(workspace_path, ANSWER_PROMPT_ID)
    } else {
        Ok(default_answer_prompt())
    }
}

fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.template.trim().is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    // An answer prompt that never sees the question cannot ground anything
    if def.id == ANSWER_PROMPT_ID
        && !(def.template.contains("{{question}}") && def.template.contains("{{context}}"))
    {
        return Err(AppError::Prompt(
            "Answer prompt must reference {{question}} and {{context}}".to_string(),
        ));
    }

    Ok(())
}
