//! Offline hashing embedder built from word and character trigram features.

use crate::embeddings::provider::EmbeddingProvider;
use std::collections::HashMap;
use zodiac_core::AppResult;

const STOP_WORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "a", "an", "as", "are", "was", "were", "for", "to", "of",
    "in", "and", "or", "but", "with", "by", "from", "this", "that", "be", "have", "has", "had",
    "it", "its", "their", "they", "them", "you", "your", "how", "what", "can", "should",
];

/// Deterministic, content-dependent embeddings that need no model server.
///
/// Words are lowercased, stripped of punctuation and filtered against a
/// stop list. Each surviving word contributes its frequency to one hashed
/// dimension and the square root of its frequency to one dimension per
/// character trigram. The result is scaled to unit length.
#[derive(Debug)]
pub struct TrigramProvider {
    dimensions: usize,
}

impl TrigramProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn bucket(&self, feature: &str, multiplier: u64) -> usize {
        let hash = feature
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(multiplier).wrapping_add(b as u64));
        (hash % self.dimensions as u64) as usize
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimensions];
        let lower = text.to_lowercase();

        let mut frequencies: HashMap<&str, u32> = HashMap::new();
        for word in lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() > 2 && !STOP_WORDS.contains(w))
        {
            *frequencies.entry(word).or_insert(0) += 1;
        }

        for (word, freq) in &frequencies {
            let chars: Vec<char> = word.chars().collect();
            for window in chars.windows(3) {
                let trigram: String = window.iter().collect();
                embedding[self.bucket(&trigram, 37)] += (*freq as f32).sqrt();
            }
            embedding[self.bucket(word, 31)] += *freq as f32;
        }

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            embedding.iter_mut().for_each(|v| *v /= norm);
        }
        embedding
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for TrigramProvider {
    fn provider_name(&self) -> &str {
        "trigram"
    }

    fn model_name(&self) -> &str {
        "trigram-v1"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(v: &[f32]) -> f32 {
        v.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    fn dot(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[tokio::test]
    async fn test_unit_length() {
        let provider = TrigramProvider::new(384);
        let embedding = provider.embed("Leo is ruled by the Sun").await.unwrap();

        assert_eq!(embedding.len(), 384);
        assert!((norm(&embedding) - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let provider = TrigramProvider::new(128);
        let texts = vec!["Aries fire".to_string(), "Pisces water".to_string()];

        let batch = provider.embed_batch(&texts).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], provider.embed("Aries fire").await.unwrap());
        assert_eq!(batch[1], provider.embed("Pisces water").await.unwrap());
    }

    #[tokio::test]
    async fn test_deterministic() {
        let provider = TrigramProvider::new(384);
        let first = provider.embed("Virgo analysis").await.unwrap();
        let second = provider.embed("Virgo analysis").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_shared_vocabulary_scores_higher() {
        let provider = TrigramProvider::new(384);
        let query = provider.embed("Taurus career advice").await.unwrap();
        let related = provider
            .embed("Taurus natives build careers slowly; advice: be patient")
            .await
            .unwrap();
        let unrelated = provider.embed("Sagittarius travels abroad").await.unwrap();

        assert!(dot(&query, &related) > dot(&query, &unrelated));
    }

    #[tokio::test]
    async fn test_empty_and_stop_words_only() {
        let provider = TrigramProvider::new(64);
        for text in ["", "the and of it"] {
            let embedding = provider.embed(text).await.unwrap();
            assert_eq!(embedding.len(), 64);
            assert!(embedding.iter().all(|&x| x == 0.0));
        }
    }

    #[tokio::test]
    async fn test_utf8_safety() {
        let provider = TrigramProvider::new(384);
        let embedding = provider
            .embed("Peixes é um signo de água ♓ muito intuitivo")
            .await
            .unwrap();
        assert!((norm(&embedding) - 1.0).abs() < 0.001);
    }
}
