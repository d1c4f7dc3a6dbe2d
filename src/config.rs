//! Configuration management for the docsift retrieval core.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.
//! Invalid chunking or search parameters are rejected here, at load
//! time, rather than mid-pipeline.

use crate::error::{DocsiftError, Result};
use crate::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Chunking configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChunkingConfig {
    /// Characters per chunk (not bytes!)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Character overlap carried between consecutive chunks
    #[serde(default = "default_overlap")]
    pub overlap: usize,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Default number of results to return
    #[serde(default = "default_k")]
    pub default_k: usize,

    /// Maximum results per query
    #[serde(default = "default_max_k")]
    pub max_k: usize,

    /// Lexical weight in score fusion: final = alpha * bm25 +
    /// (1 - alpha) * cosine. Kept closer to 0 to favor vector
    /// similarity.
    #[serde(default = "default_alpha")]
    pub alpha: f32,

    /// Maximum query string length
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
}

/// Embedding cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Directory for cached embedding files
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

// Default value functions
fn default_chunk_size() -> usize {
    1500
}

fn default_overlap() -> usize {
    200
}

fn default_k() -> usize {
    5
}

fn default_max_k() -> usize {
    100
}

fn default_alpha() -> f32 {
    0.3
}

fn default_max_query_length() -> usize {
    500
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".cache/embeddings")
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_k: default_k(),
            max_k: default_max_k(),
            alpha: default_alpha(),
            max_query_length: default_max_query_length(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| DocsiftError::Config(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Create default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// This method uses XDG Base Directory specification for file locations.
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. DOCSIFT_CONFIG env var
    /// 2. XDG config file (~/.config/docsift/config.toml)
    /// 3. ./docsift.toml in the working directory
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("DOCSIFT_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("docsift.toml").exists() {
                Self::from_file("docsift.toml")?
            } else {
                Self::default()
            }
        };

        // Point the embedding cache at the XDG cache dir unless the
        // file or environment explicitly chose a location
        if env::var("DOCSIFT_CACHE_DIR").is_err() && config.cache.cache_dir == default_cache_dir() {
            config.cache.cache_dir = xdg.embeddings_dir();
        }

        // Override with environment variables
        config.merge_env();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Chunking configuration
        if let Ok(chunk_size) = env::var("DOCSIFT_CHUNK_SIZE") {
            if let Ok(size) = chunk_size.parse() {
                self.chunking.chunk_size = size;
            }
        }
        if let Ok(overlap) = env::var("DOCSIFT_OVERLAP") {
            if let Ok(o) = overlap.parse() {
                self.chunking.overlap = o;
            }
        }

        // Search configuration
        if let Ok(default_k) = env::var("DOCSIFT_DEFAULT_K") {
            if let Ok(k) = default_k.parse() {
                self.search.default_k = k;
            }
        }
        if let Ok(max_k) = env::var("DOCSIFT_MAX_K") {
            if let Ok(k) = max_k.parse() {
                self.search.max_k = k;
            }
        }
        if let Ok(alpha) = env::var("DOCSIFT_ALPHA") {
            if let Ok(a) = alpha.parse() {
                self.search.alpha = a;
            }
        }
        if let Ok(max_query_len) = env::var("DOCSIFT_MAX_QUERY_LENGTH") {
            if let Ok(len) = max_query_len.parse() {
                self.search.max_query_length = len;
            }
        }

        // Cache configuration
        if let Ok(cache_dir) = env::var("DOCSIFT_CACHE_DIR") {
            self.cache.cache_dir = PathBuf::from(cache_dir);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate chunking config
        if self.chunking.chunk_size == 0 {
            return Err(DocsiftError::Config(
                "Chunk size must be non-zero".to_string(),
            ));
        }

        if self.chunking.overlap >= self.chunking.chunk_size {
            return Err(DocsiftError::Config(
                "Overlap must be less than chunk size".to_string(),
            ));
        }

        // Validate search config
        if self.search.default_k == 0 {
            return Err(DocsiftError::Config(
                "Default k must be non-zero".to_string(),
            ));
        }

        if self.search.default_k > self.search.max_k {
            return Err(DocsiftError::Config(
                "Default k cannot exceed max k".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.search.alpha) {
            return Err(DocsiftError::Config(
                "Alpha must be within [0, 1]".to_string(),
            ));
        }

        if self.search.max_query_length == 0 {
            return Err(DocsiftError::Config(
                "Max query length must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Chunk size: {} chars", self.chunking.chunk_size);
        tracing::info!("  Overlap: {} chars", self.chunking.overlap);
        tracing::info!("  Default k: {}", self.search.default_k);
        tracing::info!("  Max k: {}", self.search.max_k);
        tracing::info!("  Alpha: {}", self.search.alpha);
        tracing::info!("  Max query length: {}", self.search.max_query_length);
        tracing::info!("  Embedding cache: {:?}", self.cache.cache_dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.chunking.chunk_size, 1500);
        assert_eq!(config.chunking.overlap, 200);
        assert_eq!(config.search.default_k, 5);
        assert!((config.search.alpha - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_config_validation_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_overlap() {
        let mut config = Config::default();
        config.chunking.overlap = 2000; // Greater than chunk_size
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_chunk_size() {
        let mut config = Config::default();
        config.chunking.chunk_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_alpha_range() {
        let mut config = Config::default();
        config.search.alpha = 1.5;
        assert!(config.validate().is_err());

        config.search.alpha = -0.1;
        assert!(config.validate().is_err());

        config.search.alpha = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_env_var_override() {
        env::set_var("DOCSIFT_CHUNK_SIZE", "1024");
        env::set_var("DOCSIFT_ALPHA", "0.7");

        let mut config = Config::default();
        config.merge_env();

        assert_eq!(config.chunking.chunk_size, 1024);
        assert!((config.search.alpha - 0.7).abs() < f32::EPSILON);

        // Cleanup
        env::remove_var("DOCSIFT_CHUNK_SIZE");
        env::remove_var("DOCSIFT_ALPHA");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml = r#"
            [chunking]
            chunk_size = 800
            overlap = 100

            [search]
            default_k = 10
            max_k = 50
            alpha = 0.5
            max_query_length = 1000

            [cache]
            cache_dir = "/data/docsift/embeddings"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.chunking.chunk_size, 800);
        assert_eq!(config.search.default_k, 10);
        assert!((config.search.alpha - 0.5).abs() < f32::EPSILON);
        assert_eq!(
            config.cache.cache_dir,
            PathBuf::from("/data/docsift/embeddings")
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml = r#"
            [chunking]
            chunk_size = 600
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.chunking.chunk_size, 600);
        assert_eq!(config.chunking.overlap, 200);
        assert_eq!(config.search.max_k, 100);
    }

    #[test]
    fn test_validation_default_k_exceeds_max_k() {
        let mut config = Config::default();
        config.search.default_k = 200;
        config.search.max_k = 100;
        assert!(config.validate().is_err());
    }
}
