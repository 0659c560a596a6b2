//! Embedding provider trait and factory.

use super::providers::{OllamaProvider, TrigramProvider};
use std::sync::Arc;
use std::time::Duration;
use zodiac_core::config::{EmbeddingSettings, KNOWN_EMBEDDING_PROVIDERS};
use zodiac_core::{AppError, AppResult};

/// Trait for embedding providers.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Provider name (e.g. "trigram", "ollama")
    fn provider_name(&self) -> &str;

    fn model_name(&self) -> &str;

    fn dimensions(&self) -> usize;

    /// Generate embeddings for multiple texts in a batch.
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>>;

    /// Generate embedding for a single text.
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut results = self.embed_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::Knowledge("No embedding returned".to_string()))
    }
}

/// Create an embedding provider from settings.
pub fn create_provider(
    settings: &EmbeddingSettings,
    timeout: Option<Duration>,
) -> AppResult<Arc<dyn EmbeddingProvider>> {
    if settings.dimensions == 0 {
        return Err(AppError::Config(
            "Embedding dimensions must be greater than zero".to_string(),
        ));
    }

    match settings.provider.to_lowercase().as_str() {
        "trigram" => Ok(Arc::new(TrigramProvider::new(settings.dimensions))),
        "ollama" => {
            let provider = OllamaProvider::new(
                &settings.model,
                settings.dimensions,
                settings.endpoint.as_deref(),
                timeout,
            )?;
            Ok(Arc::new(provider))
        }
        other => Err(AppError::Config(format!(
            "Unknown embedding provider: '{}'. Supported providers: {}",
            other,
            KNOWN_EMBEDDING_PROVIDERS.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_trigram_provider() {
        let provider = create_provider(&EmbeddingSettings::default(), None).unwrap();
        assert_eq!(provider.provider_name(), "trigram");
        assert_eq!(provider.model_name(), "trigram-v1");
        assert_eq!(provider.dimensions(), 384);
    }

    #[test]
    fn test_create_ollama_provider_is_lazy() {
        let settings = EmbeddingSettings {
            provider: "Ollama".to_string(),
            model: "nomic-embed-text".to_string(),
            dimensions: 768,
            endpoint: Some("http://127.0.0.1:9".to_string()),
        };

        let provider = create_provider(&settings, Some(Duration::from_secs(1))).unwrap();
        assert_eq!(provider.provider_name(), "ollama");
        assert_eq!(provider.model_name(), "nomic-embed-text");
        assert_eq!(provider.dimensions(), 768);
    }

    #[test]
    fn test_create_unknown_provider() {
        let settings = EmbeddingSettings {
            provider: "openai".to_string(),
            ..EmbeddingSettings::default()
        };

        let err = create_provider(&settings, None).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("Unknown embedding provider"));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let settings = EmbeddingSettings {
            dimensions: 0,
            ..EmbeddingSettings::default()
        };
        assert!(create_provider(&settings, None).is_err());
    }

    #[tokio::test]
    async fn test_provider_embed_single() {
        let provider = create_provider(&EmbeddingSettings::default(), None).unwrap();
        let embedding = provider.embed("Capricorns are ambitious").await.unwrap();
        assert_eq!(embedding.len(), 384);
    }
}
