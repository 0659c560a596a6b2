//! Retrieval and answer orchestration with the weak-answer retry.

use crate::types::{ConsultationAnswer, ConsultationQuery};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use zodiac_core::{AppError, AppResult};
use zodiac_knowledge::DocumentIndex;
use zodiac_llm::AnswerGenerator;
use zodiac_prompt::{builtin_prompt, load_prompt, render_prompt, PromptDefinition};

/// Answers whose trimmed length is below this many characters are retried.
pub const WEAK_ANSWER_MIN_CHARS: usize = 25;

/// Passages retrieved per pass.
pub const RETRIEVAL_TOP_K: usize = 5;

pub const PRIMARY_PROMPT_ID: &str = "consult.primary";
pub const RETRY_PROMPT_ID: &str = "consult.retry";

/// Length of an answer in characters, ignoring surrounding whitespace.
pub fn answer_length(text: &str) -> usize {
    text.trim().chars().count()
}

/// Whether a generated answer is too short to return as is.
pub fn is_weak_answer(text: &str) -> bool {
    answer_length(text) < WEAK_ANSWER_MIN_CHARS
}

/// Retrieval settings for the bound category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalScope {
    pub category: String,
    pub top_k: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    Unscoped,
    Scoped(RetrievalScope),
}

/// The two prompt templates used per question.
#[derive(Debug, Clone)]
pub struct ConsultPrompts {
    pub primary: PromptDefinition,
    pub retry: PromptDefinition,
}

impl ConsultPrompts {
    /// The prompts shipped with the binary.
    pub fn builtin() -> AppResult<Self> {
        Ok(Self {
            primary: builtin_prompt(PRIMARY_PROMPT_ID)?,
            retry: builtin_prompt(RETRY_PROMPT_ID)?,
        })
    }

    /// Workspace overrides from `.zodiac/prompts/`, falling back to built-ins.
    pub fn load(workspace: &Path) -> AppResult<Self> {
        Ok(Self {
            primary: load_prompt(workspace, PRIMARY_PROMPT_ID)?,
            retry: load_prompt(workspace, RETRY_PROMPT_ID)?,
        })
    }
}

/// One retrieval plus generation pass.
struct Pass {
    answer: String,
    passages: Vec<String>,
}

/// Binds a category, then answers questions for it.
pub struct ConsultationOrchestrator {
    index: Arc<dyn DocumentIndex>,
    generator: Arc<dyn AnswerGenerator>,
    prompts: ConsultPrompts,
    scope: Scope,
}

impl ConsultationOrchestrator {
    pub fn new(
        index: Arc<dyn DocumentIndex>,
        generator: Arc<dyn AnswerGenerator>,
        prompts: ConsultPrompts,
    ) -> Self {
        Self {
            index,
            generator,
            prompts,
            scope: Scope::Unscoped,
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// The bound category, if any.
    pub fn category(&self) -> Option<&str> {
        match &self.scope {
            Scope::Scoped(scope) => Some(scope.category.as_str()),
            Scope::Unscoped => None,
        }
    }

    /// Scope subsequent answers to `category`. Re-binding replaces the scope.
    pub fn bind(&mut self, category: &str) -> AppResult<()> {
        if !self.index.is_ready() {
            return Err(AppError::IndexNotReady);
        }

        info!("Retrieval scoped to {} (k = {})", category, RETRIEVAL_TOP_K);
        self.scope = Scope::Scoped(RetrievalScope {
            category: category.to_string(),
            top_k: RETRIEVAL_TOP_K,
        });
        Ok(())
    }

    /// Answer a question for the bound category.
    ///
    /// A weak first answer triggers exactly one retry with the stricter
    /// prompt; the retry result is returned whatever its length.
    #[instrument(skip(self, question), fields(category = self.category().unwrap_or("-")))]
    pub async fn answer(&self, question: &str) -> AppResult<ConsultationAnswer> {
        let Scope::Scoped(scope) = &self.scope else {
            return Err(AppError::NotBound);
        };

        let query = ConsultationQuery {
            category: scope.category.clone(),
            raw_question: question.to_string(),
        };

        let mut pass = self.run_pass(&self.prompts.primary, &query, scope.top_k).await?;

        if is_weak_answer(&pass.answer) {
            warn!(
                "Weak answer ({} chars) for {}; retrying with the strict prompt",
                answer_length(&pass.answer),
                query.category
            );
            pass = self.run_pass(&self.prompts.retry, &query, scope.top_k).await?;
        }

        Ok(ConsultationAnswer {
            answer_text: pass.answer,
            category: query.category,
            source_excerpts: pass.passages,
            original_question: query.raw_question,
        })
    }

    async fn run_pass(
        &self,
        prompt: &PromptDefinition,
        query: &ConsultationQuery,
        top_k: usize,
    ) -> AppResult<Pass> {
        let mut variables = HashMap::new();
        variables.insert("category".to_string(), query.category.clone());
        variables.insert("question".to_string(), query.raw_question.clone());
        let rendered = render_prompt(prompt, &variables)?;

        let passages = self.index.search(&rendered.text, top_k).await?;
        debug!(
            "Prompt {} retrieved {} passages",
            rendered.id,
            passages.len()
        );

        let answer = self.generator.generate(&rendered.text, &passages).await?;
        debug!("Generated {} chars", answer_length(&answer));

        Ok(Pass { answer, passages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weak_answer_threshold() {
        assert!(is_weak_answer(""));
        assert!(is_weak_answer("   \n\t "));
        assert!(is_weak_answer("Be patient."));
        assert!(is_weak_answer(&"x".repeat(24)));
        assert!(!is_weak_answer(&"x".repeat(25)));
        assert!(is_weak_answer(&format!("   {}   ", "x".repeat(24))));
    }

    #[test]
    fn test_answer_length_counts_characters() {
        assert_eq!(answer_length("  Água ♓ \n"), 6);
        assert_eq!("Água ♓".len(), 9);
        assert_eq!(answer_length(""), 0);
    }

    #[test]
    fn test_weak_answer_counts_characters_not_bytes() {
        // 24 chars, more than 25 bytes
        let text = "é".repeat(24);
        assert!(text.len() > 25);
        assert!(is_weak_answer(&text));
    }

    #[test]
    fn test_builtin_prompts_load() {
        let prompts = ConsultPrompts::builtin().unwrap();
        assert_eq!(prompts.primary.id, PRIMARY_PROMPT_ID);
        assert_eq!(prompts.retry.id, RETRY_PROMPT_ID);
    }
}
