//! Semantic chunking pipeline.
//!
//! Converts raw document text into overlapping, section-aware chunks
//! suitable for retrieval:
//!
//! - **sections**: structural boundary detection (headers, numbered
//!   lists, underlined titles)
//! - **sentences**: sentence splitting with abbreviation handling
//! - **builder**: size-bounded chunk assembly with tail overlap
//!
//! All sizes are measured in **characters**, not bytes, so multi-byte
//! UTF-8 input never panics or splits mid-character.

pub mod builder;
pub mod sections;
pub mod sentences;

pub use builder::ChunkBuilder;
pub use sections::SectionSplitter;
pub use sentences::SentenceSplitter;
