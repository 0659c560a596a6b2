//! Knowledge system type definitions.

use serde::{Deserialize, Serialize};

/// A text chunk with its embedding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeChunk {
    /// Unique chunk identifier
    pub id: String,

    /// SHA-256 fingerprint of the source document
    pub source_id: String,

    /// Position within source
    pub position: u32,

    /// Text content, verbatim
    pub text: String,

    /// Embedding vector
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub embedding: Vec<f32>,
}

/// Chunking parameters, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// Statistics from one ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestStats {
    /// Fingerprint of the ingested document
    pub source_id: String,

    /// Number of chunks created
    pub chunks_count: u32,

    /// Bytes of cleaned text processed
    pub bytes_processed: u64,

    /// Duration in seconds
    pub duration_secs: f64,
}
