//! In-memory vector store with cosine ranking.

use crate::types::KnowledgeChunk;
use std::cmp::Ordering;

/// Chunks and their embeddings, held for the life of the process.
#[derive(Debug, Default)]
pub struct VectorStore {
    chunks: Vec<KnowledgeChunk>,
}

impl VectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, chunk: KnowledgeChunk) {
        self.chunks.push(chunk);
    }

    pub fn extend(&mut self, chunks: impl IntoIterator<Item = KnowledgeChunk>) {
        self.chunks.extend(chunks);
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Return up to `top_k` chunks, most similar first.
    ///
    /// Equal scores keep insertion order, so results are deterministic.
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> Vec<(&KnowledgeChunk, f32)> {
        let mut scored: Vec<(&KnowledgeChunk, f32)> = self
            .chunks
            .iter()
            .map(|chunk| (chunk, cosine_similarity(query_embedding, &chunk.embedding)))
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(top_k);

        tracing::debug!(
            "Vector search returned {} results (top_k: {})",
            scored.len(),
            top_k
        );

        scored
    }
}

/// Cosine similarity; mismatched lengths and zero vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
