//! Prompt loader.
//!
//! Prompts ship with the crate and can be overridden per workspace by
//! dropping `<id>.yml` into `.zodiac/prompts/`.

use crate::types::PromptDefinition;
use std::path::{Path, PathBuf};
use zodiac_core::{AppError, AppResult};

/// Prompts compiled into the binary, keyed by ID.
const BUILTIN_PROMPTS: &[(&str, &str)] = &[
    (
        "consult.primary",
        include_str!("../prompts/consult.primary.yml"),
    ),
    ("consult.retry", include_str!("../prompts/consult.retry.yml")),
];

/// Directory holding workspace prompt overrides.
pub fn prompts_dir(workspace_path: &Path) -> PathBuf {
    workspace_path.join(".zodiac").join("prompts")
}

/// Load a prompt definition by ID.
///
/// A workspace override wins over the built-in definition.
///
/// # Example
/// ```no_run
/// use zodiac_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("."), "consult.primary")?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = prompts_dir(workspace_path).join(format!("{}.yml", prompt_id));

    if prompt_file.exists() {
        tracing::debug!("Loading prompt override from: {:?}", prompt_file);

        let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
            AppError::Prompt(format!(
                "Failed to read prompt file {:?}: {}",
                prompt_file, e
            ))
        })?;
        let definition = parse_prompt(&contents, &prompt_file.display().to_string())?;

        if definition.id != prompt_id {
            return Err(AppError::Prompt(format!(
                "Prompt file {:?} declares id '{}', expected '{}'",
                prompt_file, definition.id, prompt_id
            )));
        }

        tracing::info!("Loaded prompt override: {} ({})", definition.id, definition.title);
        return Ok(definition);
    }

    builtin_prompt(prompt_id)
}

/// Load a prompt compiled into the binary.
pub fn builtin_prompt(prompt_id: &str) -> AppResult<PromptDefinition> {
    let (_, contents) = BUILTIN_PROMPTS
        .iter()
        .find(|(id, _)| *id == prompt_id)
        .ok_or_else(|| AppError::Prompt(format!("Unknown prompt: {}", prompt_id)))?;

    parse_prompt(contents, "builtin")
}

fn parse_prompt(contents: &str, origin: &str) -> AppResult<PromptDefinition> {
    let definition: PromptDefinition = serde_yaml::from_str(contents)
        .map_err(|e| AppError::Prompt(format!("Failed to parse prompt YAML {}: {}", origin, e)))?;

    validate_prompt(&definition)?;
    Ok(definition)
}

/// Validate a prompt definition.
fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.template.trim().is_empty() {
        return Err(AppError::Prompt(format!(
            "Prompt '{}' has an empty template",
            def.id
        )));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    // Every declared variable must be referenced
    for variable in &def.variables {
        if !def.template.contains(&format!("{{{{{}}}}}", variable)) {
            return Err(AppError::Prompt(format!(
                "Prompt '{}' declares variable '{}' but never uses it",
                def.id, variable
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_override(dir: &Path, id: &str, body: &str) {
        let prompts = prompts_dir(dir);
        fs::create_dir_all(&prompts).unwrap();
        fs::write(prompts.join(format!("{}.yml", id)), body).unwrap();
    }

    #[test]
    fn test_builtin_prompts_parse() {
        let primary = builtin_prompt("consult.primary").unwrap();
        assert_eq!(primary.variables, vec!["category", "question"]);

        let retry = builtin_prompt("consult.retry").unwrap();
        assert!(retry.template.contains("**only**"));
    }

    #[test]
    fn test_every_builtin_loads_by_id() {
        let temp_dir = TempDir::new().unwrap();
        for (id, _) in BUILTIN_PROMPTS {
            assert_eq!(load_prompt(temp_dir.path(), id).unwrap().id, *id);
        }
    }

    #[test]
    fn test_load_falls_back_to_builtin() {
        let temp_dir = TempDir::new().unwrap();
        let prompt = load_prompt(temp_dir.path(), "consult.primary").unwrap();
        assert_eq!(prompt.id, "consult.primary");
    }

    #[test]
    fn test_workspace_override_wins() {
        let temp_dir = TempDir::new().unwrap();
        write_override(
            temp_dir.path(),
            "consult.primary",
            "id: consult.primary\ntitle: Short\napiVersion: \"1.1\"\nvariables: [question]\ntemplate: \"Q: {{question}}\"\n",
        );

        let prompt = load_prompt(temp_dir.path(), "consult.primary").unwrap();
        assert_eq!(prompt.title, "Short");
        assert_eq!(prompt.template, "Q: {{question}}");
    }

    #[test]
    fn test_override_with_wrong_id() {
        let temp_dir = TempDir::new().unwrap();
        write_override(
            temp_dir.path(),
            "consult.retry",
            "id: something.else\ntitle: T\napiVersion: \"1.0\"\ntemplate: \"x\"\n",
        );

        assert!(load_prompt(temp_dir.path(), "consult.retry").is_err());
    }

    #[test]
    fn test_unused_variable_rejected() {
        let temp_dir = TempDir::new().unwrap();
        write_override(
            temp_dir.path(),
            "consult.retry",
            "id: consult.retry\ntitle: T\napiVersion: \"1.0\"\nvariables: [category]\ntemplate: \"nothing here\"\n",
        );

        assert!(load_prompt(temp_dir.path(), "consult.retry").is_err());
    }

    #[test]
    fn test_unknown_prompt() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_prompt(temp_dir.path(), "nonexistent").is_err());
    }
}
