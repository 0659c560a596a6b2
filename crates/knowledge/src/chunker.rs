//! Text chunking with configurable size and overlap.
//!
//! Splitting prefers semantic boundaries (paragraphs, then sentences, then
//! words) and only falls back to characters when a unit does not fit.

use crate::types::ChunkingConfig;
use text_splitter::{ChunkConfig, TextSplitter};
use zodiac_core::{AppError, AppResult};

/// One chunk of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Position within the document
    pub position: u32,

    /// Byte offset of the chunk in the source text
    pub byte_offset: usize,

    pub text: String,
}

/// Split text into overlapping chunks of at most `chunk_size` characters.
pub fn chunk_text(text: &str, config: &ChunkingConfig) -> AppResult<Vec<TextChunk>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let chunk_config = ChunkConfig::new(config.chunk_size)
        .with_overlap(config.chunk_overlap)
        .map_err(|e| AppError::Knowledge(format!("Invalid chunking settings: {}", e)))?;
    let splitter = TextSplitter::new(chunk_config);

    let chunks: Vec<TextChunk> = splitter
        .chunk_indices(text)
        .filter(|(_, chunk)| !chunk.trim().is_empty())
        .enumerate()
        .map(|(position, (byte_offset, chunk))| TextChunk {
            position: position as u32,
            byte_offset,
            text: chunk.to_string(),
        })
        .collect();

    tracing::debug!(
        "Chunked {} bytes into {} chunks (size: {}, overlap: {})",
        text.len(),
        chunks.len(),
        config.chunk_size,
        config.chunk_overlap
    );

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(chunk_size: usize, chunk_overlap: usize) -> ChunkingConfig {
        ChunkingConfig {
            chunk_size,
            chunk_overlap,
        }
    }

    #[test]
    fn test_chunk_text_empty() {
        assert!(chunk_text("", &config(100, 10)).unwrap().is_empty());
        assert!(chunk_text("  \n\n ", &config(100, 10)).unwrap().is_empty());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = chunk_text("Taurus is an earth sign.", &ChunkingConfig::default()).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].position, 0);
        assert_eq!(chunks[0].byte_offset, 0);
        assert_eq!(chunks[0].text, "Taurus is an earth sign.");
    }

    #[test]
    fn test_chunks_respect_capacity() {
        let text = "Scorpios are intense and loyal. ".repeat(100);
        let chunks = chunk_text(&text, &config(200, 50)).unwrap();

        assert!(chunks.len() > 1);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.position as usize, i);
            assert!(chunk.text.chars().count() <= 200);
        }
    }

    #[test]
    fn test_offsets_point_into_source() {
        let text = "Gemini.\n\nCuriosity drives them. ".repeat(40);
        let chunks = chunk_text(&text, &config(120, 30)).unwrap();

        for chunk in &chunks {
            assert!(text[chunk.byte_offset..].starts_with(&chunk.text));
        }
    }

    #[test]
    fn test_overlap_not_smaller_than_size_is_rejected() {
        let result = chunk_text("some text", &config(100, 100));
        assert!(matches!(result, Err(AppError::Knowledge(_))));
    }

    #[test]
    fn test_utf8_text() {
        let text = "Peixes é um signo de água ♓ com intuição profunda. ".repeat(50);
        let chunks = chunk_text(&text, &config(150, 20)).unwrap();
        assert!(!chunks.is_empty());
    }
}
