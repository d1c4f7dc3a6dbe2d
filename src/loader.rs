//! Document ingestion front door.
//!
//! Reads a plain-text document from disk, runs the chunking pipeline,
//! and attaches per-chunk metadata (source file, category, file type,
//! chunk position) ready for the external store to persist and embed.

use crate::chunking::ChunkBuilder;
use crate::config::ChunkingConfig;
use crate::error::{DocsiftError, Result};
use crate::types::ChunkRecord;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::fs;
use std::path::Path;

/// File extensions the loader accepts
const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md"];

/// Turns document files into chunk records with metadata.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    builder: ChunkBuilder,
}

impl DocumentLoader {
    /// Create a loader with explicit chunking parameters.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        Ok(Self {
            builder: ChunkBuilder::new(chunk_size, overlap)?,
        })
    }

    /// Create a loader from a validated configuration section.
    pub fn from_config(config: &ChunkingConfig) -> Result<Self> {
        Ok(Self {
            builder: ChunkBuilder::from_config(config)?,
        })
    }

    /// Process a document file into chunk records.
    ///
    /// Only plain-text formats are supported; other extensions fail
    /// with [`DocsiftError::UnsupportedFile`]. Each record carries the
    /// source file name, the category, the file type, and the chunk's
    /// position within the document.
    pub fn load(&self, path: impl AsRef<Path>, category: &str) -> Result<Vec<ChunkRecord>> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(DocsiftError::UnsupportedFile(extension));
        }

        let text = fs::read_to_string(path)?;
        let source = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        let modified_at = modified_timestamp(path);

        let chunks = self.builder.chunk_text(&text);
        tracing::debug!(source = %source, chunks = chunks.len(), "document chunked");

        Ok(chunks
            .into_iter()
            .map(|chunk| ChunkRecord {
                content: chunk.text,
                metadata: json!({
                    "source": source,
                    "category": category,
                    "file_type": extension,
                    "chunk_index": chunk.index,
                    "total_chunks": chunk.total,
                    "modified_at": modified_at,
                }),
            })
            .collect())
    }
}

/// RFC 3339 modification timestamp, when the filesystem provides one.
fn modified_timestamp(path: &Path) -> Option<String> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    let datetime: DateTime<Utc> = modified.into();
    Some(datetime.to_rfc3339())
}
