//! LLM integration crate.
//!
//! Provides a provider-agnostic [`LlmClient`] trait, an Ollama
//! implementation, and the [`AnswerGenerator`] used by the consultation
//! pipeline to turn a prompt plus retrieved passages into an answer.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use zodiac_llm::{AnswerGenerator, GenerationSettings, LlmAnswerGenerator, OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(OllamaClient::new()?);
//! let generator = LlmAnswerGenerator::new(client, GenerationSettings::default());
//! let answer = generator
//!     .generate("I am a Virgo. How do I relax?", &["Virgos are analytical.".to_string()])
//!     .await?;
//! println!("{}", answer);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod generator;
pub mod providers;

// Re-export main types
pub use client::{Completion, CompletionRequest, LlmClient, TokenUsage};
pub use factory::create_client;
pub use generator::{AnswerGenerator, GenerationSettings, LlmAnswerGenerator};
pub use providers::OllamaClient;
