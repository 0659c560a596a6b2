//! Prompt rendering.

use crate::types::{PromptDefinition, RenderedPrompt};
use handlebars::Handlebars;
use std::collections::HashMap;
use zodiac_core::{AppError, AppResult};

/// Render a prompt definition with the given variables.
///
/// Every variable the definition declares must be supplied; values are
/// inserted verbatim (no HTML escaping).
///
/// # Example
/// ```no_run
/// use std::collections::HashMap;
/// use zodiac_prompt::{builtin_prompt, render_prompt};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let def = builtin_prompt("consult.primary")?;
/// let mut vars = HashMap::new();
/// vars.insert("category".to_string(), "Leo".to_string());
/// vars.insert("question".to_string(), "Should I change jobs?".to_string());
///
/// let rendered = render_prompt(&def, &vars)?;
/// println!("{}", rendered.text);
/// # Ok(())
/// # }
/// ```
pub fn render_prompt(
    definition: &PromptDefinition,
    variables: &HashMap<String, String>,
) -> AppResult<RenderedPrompt> {
    let missing: Vec<&str> = definition
        .variables
        .iter()
        .filter(|name| !variables.contains_key(name.as_str()))
        .map(String::as_str)
        .collect();

    if !missing.is_empty() {
        return Err(AppError::Prompt(format!(
            "Prompt '{}' is missing variables: {}",
            definition.id,
            missing.join(", ")
        )));
    }

    let text = render_template(&definition.template, variables)?;
    tracing::trace!("Rendered prompt {} ({} chars)", definition.id, text.len());

    Ok(RenderedPrompt {
        id: definition.id.clone(),
        text,
    })
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text prompts, never HTML
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}
