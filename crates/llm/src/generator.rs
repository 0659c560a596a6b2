//! Answer generation over retrieved context.
//!
//! The generator receives an already category-aware prompt plus the passages
//! retrieved for it, and "stuffs" both into a single completion request.

use crate::client::{CompletionRequest, LlmClient};
use std::sync::Arc;
use zodiac_core::{AppError, AppResult};

/// Produces natural-language text conditioned on retrieved passages.
#[async_trait::async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Generate an answer for `prompt` using `context` as reference material.
    ///
    /// Failures are reported as `AppError::Generation`.
    async fn generate(&self, prompt: &str, context: &[String]) -> AppResult<String>;
}

/// Sampling settings for answer generation.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "llama3.2".to_string(),
            temperature: 0.7,
            max_tokens: 2048,
        }
    }
}

/// [`AnswerGenerator`] backed by an [`LlmClient`].
pub struct LlmAnswerGenerator {
    client: Arc<dyn LlmClient>,
    settings: GenerationSettings,
}

impl LlmAnswerGenerator {
    pub fn new(client: Arc<dyn LlmClient>, settings: GenerationSettings) -> Self {
        Self { client, settings }
    }

    fn build_request(&self, prompt: &str, context: &[String]) -> CompletionRequest {
        let user_prompt = format!(
            "Context:\n{}\n\nQuestion:\n{}\n\nHelpful answer:",
            build_context(context),
            prompt.trim()
        );

        CompletionRequest::new(user_prompt, &self.settings.model)
            .with_system(SYSTEM_PROMPT)
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_tokens)
    }
}

const SYSTEM_PROMPT: &str = "You are an astrology consultant. \
Use the following pieces of context to answer the question at the end. \
If the context does not contain the answer, say that you don't know rather than making one up. \
Do not mention the context, documents or passages in your answer.";

#[async_trait::async_trait]
impl AnswerGenerator for LlmAnswerGenerator {
    async fn generate(&self, prompt: &str, context: &[String]) -> AppResult<String> {
        tracing::debug!(
            provider = self.client.provider_name(),
            passages = context.len(),
            "Generating answer"
        );

        let request = self.build_request(prompt, context);
        let completion = self
            .client
            .complete(&request)
            .await
            .map_err(|e| AppError::Generation(e.to_string()))?;

        Ok(completion.content)
    }
}

/// Join passages into one context block, separated by blank lines.
fn build_context(passages: &[String]) -> String {
    if passages.is_empty() {
        return "(no relevant passages)".to_string();
    }
    passages
        .iter()
        .map(|p| p.trim())
        .collect::<Vec<_>>()
        .join("\n\n")
}
