//! Prompt types for the RAG assistant.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A prompt definition, built in or loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Optional system message sent alongside the rendered template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Template string with Handlebars syntax
    pub template: String,
}

/// A fully built prompt ready for LLM execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// System message (optional)
    pub system: Option<String>,

    /// User message (required)
    pub user: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    #[serde(rename = "sourcePromptId")]
    pub source_prompt_id: String,

    #[serde(rename = "resolvedVariables")]
    pub resolved_variables: HashMap<String, String>,
}

impl BuiltPrompt {
    /// Create a new built prompt.
    pub fn new(
        system: Option<String>,
        user: String,
        source_prompt_id: String,
        resolved_variables: HashMap<String, String>,
    ) -> Self {
        Self {
            system,
            user,
            metadata: BuiltPromptMetadata {
                source_prompt_id,
                resolved_variables,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_definition_deserialization() {
        let yaml = r#"
id: rag.answer
title: Answer
apiVersion: "1.0"
template: "Question: {{question}}"
"#;

        let def: PromptDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.id, "rag.answer");
        assert!(def.system.is_none());
        assert!(def.template.contains("{{question}}"));
    }
}
