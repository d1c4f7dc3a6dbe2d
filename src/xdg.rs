//! XDG Base Directory support.
//!
//! Resolves the configuration file and embedding-cache locations
//! according to the XDG Base Directory specification, with explicit
//! `DOCSIFT_*` overrides taking priority.

use std::env;
use std::fs;
use std::path::PathBuf;

/// Resolved XDG directories for docsift
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl XdgDirs {
    /// Create new XDG directory structure with proper resolution order
    ///
    /// Priority order (highest to lowest):
    /// 1. Explicit DOCSIFT_* env vars
    /// 2. XDG_* environment variables
    /// 3. XDG defaults (~/.config, ~/.cache)
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
            cache_dir: Self::resolve_cache_dir(),
        }
    }

    fn resolve_config_dir() -> PathBuf {
        if let Ok(dir) = env::var("DOCSIFT_CONFIG_DIR") {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("docsift");
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("docsift")
    }

    fn resolve_cache_dir() -> PathBuf {
        if let Ok(dir) = env::var("DOCSIFT_CACHE_DIR") {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var("XDG_CACHE_HOME") {
            return PathBuf::from(xdg).join("docsift");
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cache")
            .join("docsift")
    }

    /// Get config file path
    pub fn config_file(&self) -> PathBuf {
        if let Ok(file) = env::var("DOCSIFT_CONFIG_FILE") {
            return PathBuf::from(file);
        }

        self.config_dir.join("config.toml")
    }

    /// Get the embedding cache directory path
    pub fn embeddings_dir(&self) -> PathBuf {
        self.cache_dir.join("embeddings")
    }

    /// Create the XDG directories if they don't exist
    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(self.embeddings_dir())?;
        Ok(())
    }

    /// Log the resolved XDG paths
    pub fn log_paths(&self) {
        tracing::info!("XDG directories resolved:");
        tracing::info!("  Config: {:?}", self.config_dir);
        tracing::info!("  Cache: {:?}", self.cache_dir);
        tracing::info!("  Config file: {:?}", self.config_file());
        tracing::info!("  Embeddings: {:?}", self.embeddings_dir());
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}
