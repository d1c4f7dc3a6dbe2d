//! Hybrid retrieval engine.
//!
//! Fuses lexical (BM25) scoring with dense vector similarity to rank
//! chunks against a query, under an optional metadata filter:
//!
//! - **bm25**: term-frequency index and scorer over a fixed corpus
//! - **vector**: cosine similarity over embeddings
//! - **filter**: dotted-path metadata predicates
//! - **hybrid**: score normalization, weighted fusion, top-k ranking

pub mod bm25;
pub mod filter;
pub mod hybrid;
pub mod vector;

pub use bm25::Bm25Index;
pub use filter::{FilterValue, MetadataFilter};
pub use hybrid::HybridSearch;
pub use vector::{cosine_similarity, similarity_scores};
