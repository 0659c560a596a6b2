//! Prompt definition types.

use serde::{Deserialize, Serialize};

/// A prompt definition loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptDefinition {
    /// Unique prompt identifier (e.g., "consult.primary")
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    #[serde(default)]
    pub description: String,

    /// Variables the template requires
    #[serde(default)]
    pub variables: Vec<String>,

    /// Template string with Handlebars syntax
    pub template: String,
}

/// A rendered prompt ready to be sent to retrieval and generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    /// Source prompt ID
    pub id: String,

    /// Rendered text
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_definition_deserialization() {
        let yaml = r#"
id: test.prompt
title: Test Prompt
apiVersion: "1.0"
variables: [category]
template: "Hello {{category}}"
"#;

        let def: PromptDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.id, "test.prompt");
        assert_eq!(def.variables, vec!["category".to_string()]);
        assert!(def.description.is_empty());
    }
}
