//! Document index: ingestion of the reference document and top-k retrieval.

use crate::chunker::chunk_text;
use crate::embeddings::EmbeddingProvider;
use crate::parser::parse_file;
use crate::store::VectorStore;
use crate::types::{ChunkingConfig, IngestStats, KnowledgeChunk};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};
use zodiac_core::{AppError, AppResult};

/// Similarity search over an ingested corpus.
#[async_trait::async_trait]
pub trait DocumentIndex: Send + Sync {
    /// Whether the corpus has been ingested and searches may run.
    fn is_ready(&self) -> bool;

    /// Up to `k` passages most similar to `query`, best first, verbatim.
    async fn search(&self, query: &str, k: usize) -> AppResult<Vec<String>>;
}

/// Index backed by an embedding provider and the in-memory store.
#[derive(Debug)]
pub struct EmbeddedDocumentIndex {
    provider: Arc<dyn EmbeddingProvider>,
    store: VectorStore,
    ready: bool,
}

impl EmbeddedDocumentIndex {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            store: VectorStore::new(),
            ready: false,
        }
    }

    pub fn chunk_count(&self) -> usize {
        self.store.len()
    }

    /// Parse, chunk, embed and store a document file.
    pub async fn ingest_file(
        &mut self,
        path: &Path,
        config: &ChunkingConfig,
    ) -> AppResult<IngestStats> {
        if !path.exists() {
            return Err(AppError::Knowledge(format!(
                "Reference document not found: {:?}",
                path
            )));
        }

        info!("Ingesting reference document {:?}", path);
        let text = parse_file(path)?;
        self.ingest_text(&text, config).await
    }

    /// Chunk, embed and store already-cleaned text. The index becomes ready
    /// once at least one chunk is stored.
    #[instrument(skip(self, text, config), fields(bytes = text.len()))]
    pub async fn ingest_text(
        &mut self,
        text: &str,
        config: &ChunkingConfig,
    ) -> AppResult<IngestStats> {
        let start = Instant::now();
        let source_id = fingerprint(text);

        let pieces = chunk_text(text, config)?;
        if pieces.is_empty() {
            return Err(AppError::Knowledge(
                "Reference document contains no text".to_string(),
            ));
        }

        let texts: Vec<String> = pieces.iter().map(|p| p.text.clone()).collect();
        let embeddings = self.provider.embed_batch(&texts).await?;
        if embeddings.len() != pieces.len() {
            return Err(AppError::Knowledge(format!(
                "Embedding provider returned {} vectors for {} chunks",
                embeddings.len(),
                pieces.len()
            )));
        }

        let chunks_count = pieces.len() as u32;
        self.store
            .extend(pieces.into_iter().zip(embeddings).map(|(piece, embedding)| {
                KnowledgeChunk {
                    id: uuid::Uuid::new_v4().to_string(),
                    source_id: source_id.clone(),
                    position: piece.position,
                    text: piece.text,
                    embedding,
                }
            }));
        self.ready = true;

        info!("Processed {} text chunks", chunks_count);

        Ok(IngestStats {
            source_id,
            chunks_count,
            bytes_processed: text.len() as u64,
            duration_secs: start.elapsed().as_secs_f64(),
        })
    }
}

#[async_trait::async_trait]
impl DocumentIndex for EmbeddedDocumentIndex {
    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn search(&self, query: &str, k: usize) -> AppResult<Vec<String>> {
        if !self.ready {
            return Err(AppError::IndexNotReady);
        }

        let query_embedding = self
            .provider
            .embed(query)
            .await
            .map_err(|e| AppError::IndexUnavailable(e.to_string()))?;

        let passages: Vec<String> = self
            .store
            .search(&query_embedding, k)
            .into_iter()
            .map(|(chunk, score)| {
                debug!("Retrieved chunk {} (score: {:.3})", chunk.position, score);
                chunk.text.clone()
            })
            .collect();

        Ok(passages)
    }
}

/// Hex SHA-256 of the document text.
fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
