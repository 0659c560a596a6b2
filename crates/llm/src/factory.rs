//! LLM provider factory.

use crate::client::LlmClient;
use crate::providers::ollama::{OllamaClient, DEFAULT_OLLAMA_URL};
use std::sync::Arc;
use std::time::Duration;
use zodiac_core::{AppError, AppResult};

/// Create an LLM client from a provider name.
///
/// # Arguments
/// * `provider` - Provider identifier; only "ollama" is built today
/// * `endpoint` - Optional custom endpoint URL
/// * `timeout` - Optional per-request timeout
///
/// # Errors
/// `AppError::Config` for unknown providers, `AppError::Llm` when the
/// HTTP client cannot be constructed.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    timeout: Option<Duration>,
) -> AppResult<Arc<dyn LlmClient>> {
    match provider.to_lowercase().as_str() {
        "ollama" => {
            let base_url = endpoint.unwrap_or(DEFAULT_OLLAMA_URL);
            tracing::debug!("Creating Ollama client for {}", base_url);
            Ok(Arc::new(OllamaClient::with_base_url(base_url, timeout)?))
        }
        _ => Err(AppError::Config(format!("Unknown provider: {}", provider))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_ollama_client() {
        let client = create_client("ollama", None, None).unwrap();
        assert_eq!(client.provider_name(), "ollama");
    }

    #[test]
    fn test_provider_name_is_case_insensitive() {
        assert!(create_client("Ollama", Some("http://localhost:8080"), None).is_ok());
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("unknown", None, None) {
            Err(AppError::Config(msg)) => assert!(msg.contains("Unknown provider")),
            Err(other) => panic!("Unexpected error: {}", other),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
