//! Hybrid search: weighted fusion of BM25 and cosine scores.
//!
//! Lexical and vector scores live on different scales, so each score
//! vector is min-max normalized independently before the linear
//! blend. Normalization happens *after* metadata filtering: scores
//! are only meaningful relative to the current candidate set, and
//! excluded documents must not skew the scale.

use crate::config::SearchConfig;
use crate::error::{DocsiftError, Result};
use crate::search::bm25::Bm25Index;
use crate::search::filter::MetadataFilter;
use crate::search::vector::cosine_similarity;
use crate::types::QueryResult;
use serde_json::Value;
use std::time::Instant;

/// Epsilon added to the normalization denominator so an all-equal
/// score vector maps to zero instead of dividing by zero
const NORM_EPSILON: f32 = 1e-6;

/// Hybrid retrieval engine over an in-memory candidate set.
///
/// The candidate set is replaced wholesale by [`add_documents`];
/// the BM25 index is rebuilt per search call over the filtered
/// candidates, so there is no incremental insert path.
///
/// [`add_documents`]: HybridSearch::add_documents
#[derive(Debug, Clone)]
pub struct HybridSearch {
    documents: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    metadata: Vec<Value>,
    alpha: f32,
    default_k: usize,
    max_k: usize,
    max_query_length: usize,
}

impl HybridSearch {
    /// Create an engine with the given lexical weight.
    ///
    /// `alpha` is the BM25 share of the fused score; `1 - alpha` goes
    /// to vector similarity. Values outside `[0, 1]` are rejected.
    /// Query and result limits take the [`SearchConfig`] defaults; use
    /// [`from_config`] to customize them.
    ///
    /// [`from_config`]: HybridSearch::from_config
    pub fn new(alpha: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(DocsiftError::Config(
                "alpha must be within [0, 1]".to_string(),
            ));
        }

        let limits = SearchConfig::default();
        Ok(Self {
            documents: Vec::new(),
            embeddings: Vec::new(),
            metadata: Vec::new(),
            alpha,
            default_k: limits.default_k,
            max_k: limits.max_k,
            max_query_length: limits.max_query_length,
        })
    }

    /// Create an engine from a validated configuration section,
    /// carrying its query and result limits.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let mut engine = Self::new(config.alpha)?;
        engine.default_k = config.default_k;
        engine.max_k = config.max_k;
        engine.max_query_length = config.max_query_length;
        Ok(engine)
    }

    /// Lexical weight used in fusion.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Number of candidate documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` when no candidates are loaded.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Replace the candidate set.
    ///
    /// `documents` and `embeddings` must have equal lengths;
    /// `metadata`, when given, must match as well (missing metadata
    /// defaults to empty objects). Mismatched lengths fail with a
    /// precondition error before any state is touched.
    pub fn add_documents(
        &mut self,
        documents: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        metadata: Option<Vec<Value>>,
    ) -> Result<()> {
        let metadata = metadata
            .unwrap_or_else(|| vec![Value::Object(Default::default()); documents.len()]);

        if documents.len() != embeddings.len() || documents.len() != metadata.len() {
            return Err(DocsiftError::InputMismatch {
                documents: documents.len(),
                embeddings: embeddings.len(),
                metadata: metadata.len(),
            });
        }

        tracing::debug!(candidates = documents.len(), "candidate set replaced");

        self.documents = documents;
        self.embeddings = embeddings;
        self.metadata = metadata;
        Ok(())
    }

    /// Rank candidates against the query.
    ///
    /// Returns at most `top_k` results in descending fused score;
    /// ties keep the candidates' original relative order. A `top_k`
    /// of zero means "use the configured `default_k`", and any value
    /// above `max_k` is clamped to it. Empty or oversized queries
    /// (more than `max_query_length` characters) are rejected. An
    /// empty candidate set, or a filter that excludes everything,
    /// yields an empty result, not an error.
    pub fn search(
        &self,
        query: &str,
        query_embedding: &[f32],
        filter: Option<&MetadataFilter>,
        top_k: usize,
    ) -> Result<Vec<QueryResult>> {
        if query.trim().is_empty() {
            return Err(DocsiftError::InvalidQuery(
                "Query cannot be empty".to_string(),
            ));
        }

        if query.chars().count() > self.max_query_length {
            return Err(DocsiftError::InvalidQuery(format!(
                "Query exceeds {} characters",
                self.max_query_length
            )));
        }

        let top_k = if top_k == 0 {
            self.default_k
        } else {
            top_k.min(self.max_k)
        };

        if self.documents.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();

        // Indices of candidates that pass the metadata filter
        let valid_indices: Vec<usize> = match filter {
            Some(filter) => (0..self.documents.len())
                .filter(|&i| filter.matches(&self.metadata[i]))
                .collect(),
            None => (0..self.documents.len()).collect(),
        };

        if valid_indices.is_empty() {
            tracing::debug!("metadata filter excluded every candidate");
            return Ok(Vec::new());
        }

        // Score the restricted candidate set only; excluded documents
        // never contribute to normalization statistics
        let restricted: Vec<&str> = valid_indices
            .iter()
            .map(|&i| self.documents[i].as_str())
            .collect();

        let mut lexical = Bm25Index::build(&restricted).scores(query);
        let mut vector: Vec<f32> = valid_indices
            .iter()
            .map(|&i| cosine_similarity(query_embedding, &self.embeddings[i]))
            .collect();

        min_max_normalize(&mut lexical);
        min_max_normalize(&mut vector);

        let fused: Vec<f32> = lexical
            .iter()
            .zip(vector.iter())
            .map(|(lex, vec)| self.alpha * lex + (1.0 - self.alpha) * vec)
            .collect();

        // Stable sort keeps ties in original restricted order
        let mut ranked: Vec<usize> = (0..fused.len()).collect();
        ranked.sort_by(|&a, &b| {
            fused[b]
                .partial_cmp(&fused[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let results: Vec<QueryResult> = ranked
            .into_iter()
            .take(top_k)
            .map(|r| {
                let original = valid_indices[r];
                QueryResult {
                    content: self.documents[original].clone(),
                    metadata: self.metadata[original].clone(),
                    score: fused[r],
                }
            })
            .collect();

        tracing::debug!(
            candidates = valid_indices.len(),
            results = results.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "hybrid search completed"
        );

        Ok(results)
    }
}

/// Min-max normalize scores into `[0, 1]` in place.
///
/// Uses `(x - min) / (max - min + epsilon)`; an all-equal vector maps
/// to all zeros.
fn min_max_normalize(scores: &mut [f32]) {
    let Some(min) = scores.iter().copied().reduce(f32::min) else {
        return;
    };
    let max = scores.iter().copied().reduce(f32::max).unwrap_or(min);

    for score in scores.iter_mut() {
        *score = (*score - min) / (max - min + NORM_EPSILON);
    }
}
