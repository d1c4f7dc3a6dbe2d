//! Section-aware chunk assembly.
//!
//! Consumes sections and sentences to produce a sequence of
//! overlapping chunks bounded by a target character size. Flushing
//! happens *before* the triggering sentence is appended, so no chunk
//! except possibly the last exceeds `chunk_size` by more than the
//! length of a single sentence. A sentence longer than `chunk_size`
//! is never split further: sentence integrity outranks strict size
//! compliance.

use crate::chunking::sections::SectionSplitter;
use crate::chunking::sentences::SentenceSplitter;
use crate::config::ChunkingConfig;
use crate::error::{DocsiftError, Result};
use crate::types::Chunk;

/// Builds overlapping, section-aware chunks from raw text.
#[derive(Debug, Clone)]
pub struct ChunkBuilder {
    chunk_size: usize,
    overlap: usize,
    sections: SectionSplitter,
    sentences: SentenceSplitter,
}

impl ChunkBuilder {
    /// Create a new chunk builder.
    ///
    /// Fails fast with a configuration error when `chunk_size` is
    /// zero or `overlap >= chunk_size`, rather than mid-chunking.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(DocsiftError::Config(
                "chunk_size must be > 0".to_string(),
            ));
        }
        if overlap >= chunk_size {
            return Err(DocsiftError::Config(
                "overlap must be < chunk_size".to_string(),
            ));
        }

        Ok(Self {
            chunk_size,
            overlap,
            sections: SectionSplitter::new(),
            sentences: SentenceSplitter::new(),
        })
    }

    /// Create a chunk builder from a validated configuration section.
    pub fn from_config(config: &ChunkingConfig) -> Result<Self> {
        Self::new(config.chunk_size, config.overlap)
    }

    /// Get the chunk size in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Get the overlap size in characters.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Chunk text into overlapping, section-aware segments.
    ///
    /// Fragment lengths are counted in characters via `chars()`, so
    /// multi-byte UTF-8 input is safe. Empty input yields an empty
    /// vector, not an error.
    pub fn chunk_text(&self, text: &str) -> Vec<Chunk> {
        let mut chunks: Vec<String> = Vec::new();
        // Fragment buffer for the chunk under construction, with a
        // running character count (join separators are not counted)
        let mut current: Vec<String> = Vec::new();
        let mut current_len = 0usize;

        for section in self.sections.split(text) {
            if let Some(title) = &section.title {
                if !current.is_empty() && current_len > 0 {
                    chunks.push(current.join("\n"));
                    current.clear();
                    current_len = 0;
                }
                current.push(title.clone());
                current_len += char_len(title);
            }

            let body = section.content.join("\n");
            for sentence in self.sentences.split(&body) {
                let sentence_len = char_len(&sentence);

                if current_len + sentence_len > self.chunk_size && !current.is_empty() {
                    chunks.push(current.join("\n"));
                    let carried = self.carry_overlap(&current);
                    current_len = carried.iter().map(|s| char_len(s)).sum();
                    current = carried;
                }

                current.push(sentence);
                current_len += sentence_len;
            }
        }

        if !current.is_empty() {
            chunks.push(current.join("\n"));
        }

        let total = chunks.len();
        chunks
            .into_iter()
            .enumerate()
            .map(|(index, text)| Chunk { text, index, total })
            .collect()
    }

    /// Walk the flushed fragment list in reverse, accumulating
    /// fragments into the overlap seed while their cumulative length
    /// stays within the overlap budget. Stops at the first fragment
    /// that would exceed it.
    fn carry_overlap(&self, flushed: &[String]) -> Vec<String> {
        let mut carried: Vec<String> = Vec::new();
        let mut carried_len = 0usize;

        for fragment in flushed.iter().rev() {
            let len = char_len(fragment);
            if carried_len + len > self.overlap {
                break;
            }
            carried.push(fragment.clone());
            carried_len += len;
        }

        carried.reverse();
        carried
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
