//! Ollama LLM provider implementation.
//!
//! Ollama API: https://github.com/ollama/ollama/blob/main/docs/api.md

use crate::client::{Completion, CompletionRequest, LlmClient, TokenUsage};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use zodiac_core::{AppError, AppResult};

/// Default local endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Ollama `/api/generate` request body.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize, Default)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Ollama `/api/generate` response body (non-streaming).
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    model: String,
    response: String,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

/// Ollama LLM client.
pub struct OllamaClient {
    base_url: String,
    client: reqwest::Client,
}

impl OllamaClient {
    /// Client for the default local endpoint.
    pub fn new() -> AppResult<Self> {
        Self::with_base_url(DEFAULT_OLLAMA_URL, None)
    }

    /// Client for a custom endpoint with an optional request timeout.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Llm(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn to_generate_request(&self, request: &CompletionRequest) -> GenerateRequest {
        GenerateRequest {
            model: request.model.clone(),
            prompt: request.prompt.clone(),
            system: request.system.clone(),
            stream: false,
            options: GenerateOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        }
    }

    fn to_completion(response: GenerateResponse) -> Completion {
        Completion {
            content: response.response,
            model: response.model,
            usage: TokenUsage::new(
                response.prompt_eval_count.unwrap_or(0),
                response.eval_count.unwrap_or(0),
            ),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for OllamaClient {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, request: &CompletionRequest) -> AppResult<Completion> {
        tracing::debug!(
            model = %request.model,
            prompt_chars = request.prompt.len(),
            "Sending completion request to Ollama"
        );

        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&self.to_generate_request(request))
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to send request to Ollama: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Llm(format!(
                "Ollama API error ({}): {}",
                status, error_text
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse Ollama response: {}", e)))?;

        let completion = Self::to_completion(body);
        tracing::debug!(
            completion_tokens = completion.usage.completion_tokens,
            "Received completion from Ollama"
        );
        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_client_creation() {
        let client = OllamaClient::new().unwrap();
        assert_eq!(client.provider_name(), "ollama");
        assert_eq!(client.base_url, DEFAULT_OLLAMA_URL);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = OllamaClient::with_base_url("http://gpu-box:11434/", None).unwrap();
        assert_eq!(client.base_url, "http://gpu-box:11434");
    }

    #[test]
    fn test_generate_request_conversion() {
        let client = OllamaClient::new().unwrap();
        let request = CompletionRequest::new("Hello", "llama3.2")
            .with_temperature(0.7)
            .with_max_tokens(100);

        let body = client.to_generate_request(&request);
        assert_eq!(body.model, "llama3.2");
        assert_eq!(body.prompt, "Hello");
        assert!(!body.stream);
        assert_eq!(body.options.temperature, Some(0.7));
        assert_eq!(body.options.num_predict, Some(100));
    }

    #[test]
    fn test_response_conversion() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"model":"llama3.2","response":"Stay patient.","done":true,"prompt_eval_count":10,"eval_count":4}"#,
        )
        .unwrap();

        let completion = OllamaClient::to_completion(body);
        assert_eq!(completion.content, "Stay patient.");
        assert_eq!(completion.usage.total_tokens, 14);
    }
}
