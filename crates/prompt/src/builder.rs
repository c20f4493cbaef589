//! Prompt builder for rendering templates.

use crate::types::{BuiltPrompt, PromptDefinition};
use handlebars::Handlebars;
use ragassist_core::{AppError, AppResult};
use std::collections::HashMap;

/// Build a prompt from a definition and input variables.
///
/// # Example
/// ```no_run
/// use ragassist_prompt::{build_prompt, default_answer_prompt};
/// use std::collections::HashMap;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut vars = HashMap::new();
/// vars.insert("question".to_string(), "What is Rust?".to_string());
/// vars.insert("context".to_string(), "Source: rust.md\nRust is...".to_string());
///
/// let built = build_prompt(&default_answer_prompt(), vars)?;
/// println!("User prompt: {}", built.user);
/// # Ok(())
/// # }
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    variables: HashMap<String, String>,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    let user = render_template(&definition.template, &variables)?;

    Ok(BuiltPrompt::new(
        definition.system.clone(),
        user,
        definition.id.clone(),
        variables,
    ))
}

/// Render a Handlebars template with variables.
pub fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Retrieved text is passed through verbatim
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::default_answer_prompt;

    #[test]
    fn test_render_simple_template() {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "Hello, world!".to_string());

        let result = render_template("Question: {{question}}", &vars).unwrap();
        assert_eq!(result, "Question: Hello, world!");
    }

    #[test]
    fn test_render_does_not_escape() {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), "<div> & \"quotes\"".to_string());

        let result = render_template("{{context}}", &vars).unwrap();
        assert_eq!(result, "<div> & \"quotes\"");
    }

    #[test]
    fn test_render_invalid_template() {
        let result = render_template("{{#if}}", &HashMap::new());
        assert!(matches!(result, Err(AppError::Prompt(_))));
    }

    #[test]
    fn test_build_default_answer_prompt() {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "What is overfitting?".to_string());
        vars.insert(
            "context".to_string(),
            "Source: ml.txt\nOverfitting memorises noise.".to_string(),
        );

        let built = build_prompt(&default_answer_prompt(), vars).unwrap();
        assert!(built.user.contains("Question: What is overfitting?"));
        assert!(built.user.contains("Overfitting memorises noise."));
        assert!(built.user.contains("ONLY the provided context"));
        assert!(built.user.trim_end().ends_with("Answer:"));
        assert_eq!(built.metadata.source_prompt_id, "rag.answer");
    }
}
