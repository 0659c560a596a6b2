//! Prompt system.
//!
//! YAML prompt definitions rendered with Handlebars. The consultation
//! prompts ship built in and may be overridden per workspace.

pub mod builder;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::render_prompt;
pub use loader::{builtin_prompt, load_prompt};
pub use types::{PromptDefinition, RenderedPrompt};
