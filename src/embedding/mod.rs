//! Embedding provider interface and caching.
//!
//! The core never generates embeddings itself; callers supply a
//! provider implementing [`EmbeddingProvider`]. Providers are assumed
//! deterministic per (text, model) pair, which is what makes the
//! file-backed [`EmbeddingCache`] safe to reuse across runs.

pub mod cache;

pub use cache::EmbeddingCache;

use crate::error::Result;

/// External collaborator that turns text into a dense vector.
pub trait EmbeddingProvider {
    /// Generate an embedding for the given text.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Identifier of the underlying model; part of the cache key.
    fn model_name(&self) -> &str;
}

/// Cache-through wrapper around an embedding provider.
pub struct CachedEmbedder<P: EmbeddingProvider> {
    provider: P,
    cache: EmbeddingCache,
}

impl<P: EmbeddingProvider> CachedEmbedder<P> {
    pub fn new(provider: P, cache: EmbeddingCache) -> Self {
        Self { provider, cache }
    }

    /// Embed text, consulting the cache first.
    ///
    /// Cache misses call the provider and store the result
    /// best-effort; a failing cache write never fails the embed.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let model = self.provider.model_name();
        if let Some(embedding) = self.cache.get(text, model) {
            return Ok(embedding);
        }

        let embedding = self.provider.embed(text)?;
        self.cache.set(text, model, &embedding);
        Ok(embedding)
    }

    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }
}
