//! docsift - Semantic Chunking and Hybrid Retrieval
//!
//! An in-memory retrieval core for document Q&A: section-aware
//! semantic chunking plus hybrid BM25/vector search with metadata
//! filtering. Persistence, embedding generation and answer
//! generation are external collaborators reached through plain data
//! structures and the [`embedding::EmbeddingProvider`] trait.
//!
//! # Architecture
//!
//! - **chunking**: raw text -> sections -> sentences -> overlapping,
//!   size-bounded chunks
//! - **search**: BM25 lexical scoring, cosine vector scoring, and
//!   weighted score fusion under an optional metadata filter
//! - **embedding**: provider trait and a file-backed cache keyed by
//!   (text, model)
//! - **loader**: turns text files into chunk records with metadata
//! - **categories**: prompt-template table for the downstream answer
//!   generator
//! - **config / error / xdg**: TOML + env configuration, crate-wide
//!   error type, XDG paths
//!
//! # Key properties
//!
//! - Character-based sizing (UTF-8 safe, never splits a char)
//! - Deterministic ranking: stable tie-break by original corpus order
//! - Degenerate numeric cases (zero-norm vectors, all-equal score
//!   vectors) handled by explicit zero/epsilon policies, never panics
//! - Pure synchronous CPU-bound core: no I/O outside loader and cache

pub mod categories;
pub mod chunking;
pub mod config;
pub mod embedding;
pub mod error;
pub mod loader;
pub mod search;
pub mod types;
pub mod xdg;

// Re-export commonly used types for convenience
pub use categories::{Category, CategoryConfig};
pub use chunking::ChunkBuilder;
pub use config::Config;
pub use embedding::{CachedEmbedder, EmbeddingCache, EmbeddingProvider};
pub use error::{DocsiftError, Result};
pub use loader::DocumentLoader;
pub use search::{Bm25Index, HybridSearch, MetadataFilter};
pub use types::{Chunk, ChunkRecord, QueryResult, Section};
