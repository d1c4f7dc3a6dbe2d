//! Core data types for the docsift retrieval core.
//!
//! This module defines the plain data structures exchanged between
//! the chunking pipeline, the hybrid search engine, and the external
//! collaborators (store, embedding provider).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A titled group of lines produced by the section splitter.
///
/// Sections are an intermediate chunking artifact; they are consumed
/// by the chunk builder and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Header line that opened the section, if any. Text before the
    /// first detected header lands in a section with no title.
    pub title: Option<String>,

    /// Body lines in document order
    pub content: Vec<String>,
}

/// A bounded, possibly-overlapping span of processed document text.
///
/// Invariant: `index < total` for every chunk produced from the same
/// document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// Joined text content (title and sentence fragments separated
    /// by newlines)
    pub text: String,

    /// Position of this chunk within the document's output sequence
    pub index: usize,

    /// Number of chunks the document produced
    pub total: usize,
}

/// A chunk paired with its document metadata, ready to hand to the
/// external store (which attaches the embedding).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Chunk text content
    pub content: String,

    /// Document metadata (source, category, file_type, chunk_index,
    /// total_chunks, ...) as a JSON object so the dotted-path filter
    /// can traverse arbitrary shapes
    pub metadata: Value,
}

/// A single ranked hit returned by hybrid search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// Matched chunk content
    pub content: String,

    /// Metadata of the matched candidate, as supplied at indexing time
    pub metadata: Value,

    /// Fused relevance score in `[0, 1]` (higher = more relevant)
    pub score: f32,
}
