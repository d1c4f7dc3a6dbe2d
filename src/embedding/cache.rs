//! Filesystem-backed embedding cache.
//!
//! Embeddings are deterministic per (text, model) pair, so entries
//! are keyed by the SHA-256 of `"{text}:{model}"` and stored as one
//! JSON file each. Reads treat corrupt entries as misses and delete
//! them; writes are best-effort and never fail the caller.

use crate::config::CacheConfig;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// One cached embedding, with enough context to audit the entry
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    text: String,
    model: String,
    embedding: Vec<f32>,
}

/// Key/value cache for embeddings, one JSON file per entry.
#[derive(Debug, Clone)]
pub struct EmbeddingCache {
    cache_dir: PathBuf,
}

impl EmbeddingCache {
    /// Create a cache rooted at the given directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Create a cache from a configuration section.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.cache_dir.clone())
    }

    /// Returns the cache root directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Look up a cached embedding.
    ///
    /// Returns `None` on a miss. A corrupt cache file is deleted and
    /// reported as a miss.
    pub fn get(&self, text: &str, model: &str) -> Option<Vec<f32>> {
        let path = self.entry_path(text, model);
        let contents = fs::read_to_string(&path).ok()?;

        match serde_json::from_str::<CacheEntry>(&contents) {
            Ok(entry) => Some(entry.embedding),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "removing corrupt cache entry");
                let _ = fs::remove_file(&path);
                None
            }
        }
    }

    /// Store an embedding.
    ///
    /// Best-effort: failures are logged and swallowed so a read-only
    /// cache directory degrades to cache-miss behavior.
    pub fn set(&self, text: &str, model: &str, embedding: &[f32]) {
        let entry = CacheEntry {
            text: text.to_string(),
            model: model.to_string(),
            embedding: embedding.to_vec(),
        };

        if let Err(e) = self.try_write(&self.entry_path(text, model), &entry) {
            tracing::warn!(error = %e, "failed to write embedding cache entry");
        }
    }

    /// Delete every cached entry.
    pub fn clear(&self) -> std::io::Result<()> {
        if !self.cache_dir.exists() {
            return Ok(());
        }
        for entry in fs::read_dir(&self.cache_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        fs::read_dir(&self.cache_dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
                    .count()
            })
            .unwrap_or(0)
    }

    /// Returns `true` when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry_path(&self, text: &str, model: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", cache_key(text, model)))
    }

    fn try_write(&self, path: &Path, entry: &CacheEntry) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)?;
        let json = serde_json::to_string(entry)?;
        fs::write(path, json)
    }
}

/// Deterministic cache key from text and model name.
fn cache_key(text: &str, model: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{text}:{model}"));
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_miss_on_empty_cache() {
        let dir = TempDir::new().unwrap();
        let cache = EmbeddingCache::new(dir.path());
        assert!(cache.get("hello", "model-a").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_then_get() {
        let dir = TempDir::new().unwrap();
        let cache = EmbeddingCache::new(dir.path());

        cache.set("hello", "model-a", &[0.1, 0.2, 0.3]);
        let embedding = cache.get("hello", "model-a").unwrap();
        assert_eq!(embedding, vec![0.1, 0.2, 0.3]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_key_depends_on_model() {
        let dir = TempDir::new().unwrap();
        let cache = EmbeddingCache::new(dir.path());

        cache.set("hello", "model-a", &[1.0]);
        assert!(cache.get("hello", "model-b").is_none());
    }

    #[test]
    fn test_corrupt_entry_is_deleted_and_missed() {
        let dir = TempDir::new().unwrap();
        let cache = EmbeddingCache::new(dir.path());

        cache.set("hello", "model-a", &[1.0]);
        let path = cache.entry_path("hello", "model-a");
        fs::write(&path, "not json at all").unwrap();

        assert!(cache.get("hello", "model-a").is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_clear_removes_entries() {
        let dir = TempDir::new().unwrap();
        let cache = EmbeddingCache::new(dir.path());

        cache.set("one", "m", &[1.0]);
        cache.set("two", "m", &[2.0]);
        assert_eq!(cache.len(), 2);

        cache.clear().unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_on_missing_dir_is_ok() {
        let dir = TempDir::new().unwrap();
        let cache = EmbeddingCache::new(dir.path().join("never-created"));
        assert!(cache.clear().is_ok());
    }

    #[test]
    fn test_cache_key_is_stable_hex() {
        let key = cache_key("text", "model");
        assert_eq!(key.len(), 64);
        assert_eq!(key, cache_key("text", "model"));
        assert_ne!(key, cache_key("text2", "model"));
    }
}
