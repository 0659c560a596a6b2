//! Knowledge system for zodiac consultations.
//!
//! Ingests the reference document (parse, chunk, embed) into an in-memory
//! vector store and serves top-k passage retrieval through [`DocumentIndex`].

pub mod chunker;
pub mod embeddings;
pub mod parser;
pub mod retriever;
pub mod store;
pub mod types;

// Re-export main types
pub use embeddings::{create_provider, EmbeddingProvider};
pub use retriever::{DocumentIndex, EmbeddedDocumentIndex};
pub use types::{ChunkingConfig, IngestStats, KnowledgeChunk};
