//! Error types and error handling for the docsift retrieval core.
//!
//! This module defines the error types used throughout the crate.
//! External collaborators (embedding providers, stores) wrap their
//! own failures into these variants at the boundary.

use thiserror::Error;

/// Result type alias for docsift operations
pub type Result<T> = std::result::Result<T, DocsiftError>;

/// Main error type for the docsift core
#[derive(Error, Debug)]
pub enum DocsiftError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error(
        "Input length mismatch: {documents} documents, {embeddings} embeddings, \
         {metadata} metadata entries"
    )]
    InputMismatch {
        documents: usize,
        embeddings: usize,
        metadata: usize,
    },

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl DocsiftError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this error came from caller-supplied input
    /// (bad config, invalid query, mismatched candidate vectors)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            DocsiftError::Config(_)
                | DocsiftError::InvalidQuery(_)
                | DocsiftError::InputMismatch { .. }
                | DocsiftError::UnsupportedFile(_)
        )
    }

    /// Check if this error came from an external collaborator
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            DocsiftError::Embedding(_) | DocsiftError::Cache(_) | DocsiftError::Io(_)
        )
    }
}
