//! Ollama embedding provider.
//!
//! Semantic embeddings from a local Ollama server (`/api/embeddings`),
//! e.g. with `nomic-embed-text`. Requests are retried with exponential
//! backoff. The server is only contacted on the first embed call.

use crate::embeddings::EmbeddingProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use zodiac_core::{AppError, AppResult};

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const EMBEDDING_ENDPOINT: &str = "/api/embeddings";

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 100;
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    dimensions: usize,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl OllamaProvider {
    /// Build a provider. The base URL comes from `endpoint`, then the
    /// `OLLAMA_URL` environment variable, then the local default.
    pub fn new(
        model: &str,
        dimensions: usize,
        endpoint: Option<&str>,
        timeout: Option<Duration>,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
            .build()
            .map_err(|e| AppError::Llm(format!("Failed to create HTTP client for Ollama: {}", e)))?;

        let base_url = endpoint
            .map(str::to_string)
            .or_else(|| std::env::var("OLLAMA_URL").ok())
            .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            base_url,
            model: model.to_string(),
            dimensions,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self, text), fields(text_len = text.len(), model = %self.model))]
    async fn embed_with_retries(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut attempt = 0;

        loop {
            match self.embed_single(text).await {
                Ok(embedding) => return Ok(embedding),
                Err(e) => {
                    attempt += 1;
                    if attempt >= MAX_RETRIES {
                        return Err(e);
                    }

                    let backoff_ms = INITIAL_BACKOFF_MS * 2_u64.pow(attempt);
                    warn!(
                        "Embedding failed (attempt {}/{}), retrying in {}ms: {}",
                        attempt, MAX_RETRIES, backoff_ms, e
                    );
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                }
            }
        }
    }

    async fn embed_single(&self, text: &str) -> AppResult<Vec<f32>> {
        let url = format!("{}{}", self.base_url, EMBEDDING_ENDPOINT);
        let request = EmbeddingRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                AppError::Llm(format!(
                    "Ollama not reachable at {} ({}). Is it running, and is '{}' pulled?",
                    self.base_url, e, self.model
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|r| r.error)
                .unwrap_or(body);
            return Err(AppError::Llm(format!("Ollama API error ({}): {}", status, message)));
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse Ollama response: {}", e)))?;

        if body.embedding.len() != self.dimensions {
            return Err(AppError::Llm(format!(
                "Ollama model '{}' returned {} dimensions, expected {}",
                self.model,
                body.embedding.len(),
                self.dimensions
            )));
        }

        Ok(body.embedding)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    #[instrument(skip(self, texts), fields(batch_size = texts.len(), provider = "ollama"))]
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        debug!("Embedding batch of {} texts", texts.len());

        // The endpoint takes one prompt per request
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            if text.trim().is_empty() {
                embeddings.push(vec![0.0; self.dimensions]);
                continue;
            }
            embeddings.push(self.embed_with_retries(text).await?);
        }

        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_overrides_default() {
        let provider =
            OllamaProvider::new("nomic-embed-text", 768, Some("http://gpu-box:11434/"), None)
                .unwrap();
        assert_eq!(provider.base_url(), "http://gpu-box:11434");
        assert_eq!(provider.dimensions(), 768);
        assert_eq!(provider.model_name(), "nomic-embed-text");
    }

    #[tokio::test]
    async fn test_blank_texts_skip_the_server() {
        let provider =
            OllamaProvider::new("nomic-embed-text", 8, Some("http://127.0.0.1:9"), None).unwrap();

        let embeddings = provider
            .embed_batch(&["   ".to_string(), String::new()])
            .await
            .unwrap();
        assert_eq!(embeddings, vec![vec![0.0; 8], vec![0.0; 8]]);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() {
        let provider = OllamaProvider::new(
            "nomic-embed-text",
            8,
            Some("http://127.0.0.1:9"),
            Some(Duration::from_millis(200)),
        )
        .unwrap();

        let result = provider.embed("Aquarius").await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
