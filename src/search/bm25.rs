//! In-memory BM25 index and scorer.
//!
//! Tokenization is plain whitespace splitting with no stemming and no
//! case folding, which keeps scores exactly reproducible. The corpus
//! is immutable after `build`; adding or removing documents requires
//! a full rebuild. That is acceptable because corpora here are
//! query-time candidate sets assembled fresh per retrieval call, not
//! a long-lived index.

use std::collections::{HashMap, HashSet};

/// Term saturation parameter
const K1: f32 = 1.5;

/// Document length normalization parameter
const B: f32 = 0.75;

/// Term-frequency index over a fixed document set.
#[derive(Debug, Clone)]
pub struct Bm25Index {
    /// Per-document term frequencies
    doc_term_freqs: Vec<HashMap<String, u32>>,

    /// Per-document token counts
    doc_lens: Vec<usize>,

    /// Number of documents containing each term
    doc_freqs: HashMap<String, usize>,

    /// Average document length across the corpus
    avg_doc_len: f32,
}

impl Bm25Index {
    /// Build an index over the given documents.
    pub fn build<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut doc_term_freqs = Vec::with_capacity(documents.len());
        let mut doc_lens = Vec::with_capacity(documents.len());
        let mut doc_freqs: HashMap<String, usize> = HashMap::new();

        for document in documents {
            let tokens: Vec<&str> = tokenize(document.as_ref());
            let mut term_freq: HashMap<String, u32> = HashMap::new();
            for token in &tokens {
                *term_freq.entry((*token).to_string()).or_insert(0) += 1;
            }
            for term in term_freq.keys() {
                *doc_freqs.entry(term.clone()).or_insert(0) += 1;
            }
            doc_lens.push(tokens.len());
            doc_term_freqs.push(term_freq);
        }

        let avg_doc_len = if doc_lens.is_empty() {
            0.0
        } else {
            doc_lens.iter().sum::<usize>() as f32 / doc_lens.len() as f32
        };

        Self {
            doc_term_freqs,
            doc_lens,
            doc_freqs,
            avg_doc_len,
        }
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.doc_term_freqs.len()
    }

    /// Returns `true` when the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.doc_term_freqs.is_empty()
    }

    /// Score the query against every indexed document.
    ///
    /// Returns one score per document, in corpus order. A query with
    /// no matching terms scores `0.0` everywhere.
    pub fn scores(&self, query: &str) -> Vec<f32> {
        let query_tokens = tokenize(query);
        (0..self.len())
            .map(|doc| self.score_document(doc, &query_tokens))
            .collect()
    }

    fn score_document(&self, doc: usize, query_tokens: &[&str]) -> f32 {
        let term_freqs = &self.doc_term_freqs[doc];
        let doc_len = self.doc_lens[doc];
        let total_docs = self.len();
        if query_tokens.is_empty() || doc_len == 0 || total_docs == 0 {
            return 0.0;
        }

        let mut score = 0.0;
        let mut seen = HashSet::new();
        for token in query_tokens {
            if !seen.insert(*token) {
                continue;
            }
            let Some(&tf) = term_freqs.get(*token) else {
                continue;
            };

            let df = *self.doc_freqs.get(*token).unwrap_or(&0) as f32;
            let n = total_docs as f32;
            let idf = ((n - df + 0.5) / (df + 0.5)).ln_1p().max(0.0);

            let tf = tf as f32;
            let length_norm = 1.0 - B + B * doc_len as f32 / self.avg_doc_len.max(1.0);
            score += idf * (tf * (K1 + 1.0)) / (tf + K1 * length_norm);
        }
        score
    }
}

/// Whitespace tokenization: no stemming, no case folding.
fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "cats are great".to_string(),
            "dogs are loyal".to_string(),
            "cats and dogs can be friends".to_string(),
        ]
    }

    #[test]
    fn test_scores_length_matches_corpus() {
        let index = Bm25Index::build(&corpus());
        assert_eq!(index.len(), 3);
        assert_eq!(index.scores("cats").len(), 3);
    }

    #[test]
    fn test_matching_term_scores_higher() {
        let index = Bm25Index::build(&corpus());
        let scores = index.scores("cats");

        assert!(scores[0] > 0.0);
        assert!((scores[1] - 0.0).abs() < f32::EPSILON);
        assert!(scores[2] > 0.0);
    }

    #[test]
    fn test_rare_term_outranks_common_term() {
        let index = Bm25Index::build(&corpus());
        // "loyal" appears in one document, "are" in two
        let loyal = index.scores("loyal");
        let are = index.scores("are");

        assert!(loyal[1] > are[1]);
    }

    #[test]
    fn test_no_matching_terms_scores_zero() {
        let index = Bm25Index::build(&corpus());
        let scores = index.scores("zebra");
        assert!(scores.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_empty_query_scores_zero() {
        let index = Bm25Index::build(&corpus());
        let scores = index.scores("");
        assert!(scores.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_empty_corpus() {
        let index = Bm25Index::build(&Vec::<String>::new());
        assert!(index.is_empty());
        assert!(index.scores("anything").is_empty());
    }

    #[test]
    fn test_no_case_folding() {
        let index = Bm25Index::build(&corpus());
        // Tokenization is exact; "Cats" does not match "cats"
        let scores = index.scores("Cats");
        assert!(scores.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_repeated_query_term_counted_once() {
        let index = Bm25Index::build(&corpus());
        let single = index.scores("cats");
        let repeated = index.scores("cats cats cats");
        assert_eq!(single, repeated);
    }

    #[test]
    fn test_shorter_document_scores_higher_for_same_tf() {
        let docs = vec![
            "ferret".to_string(),
            "ferret with a much longer tail of extra words".to_string(),
        ];
        let index = Bm25Index::build(&docs);
        let scores = index.scores("ferret");
        assert!(scores[0] > scores[1]);
    }
}
