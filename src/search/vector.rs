//! Dense vector similarity scoring.

/// Cosine similarity between two vectors.
///
/// When either vector has zero norm (or the lengths disagree) the
/// similarity is defined as `0.0` rather than dividing by zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Cosine similarity of the query embedding against each document
/// embedding, in document order.
pub fn similarity_scores(query: &[f32], documents: &[Vec<f32>]) -> Vec<f32> {
    documents
        .iter()
        .map(|doc| cosine_similarity(query, doc))
        .collect()
}
