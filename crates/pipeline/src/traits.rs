//! Core traits for the similarity pipeline.
//!
//! This module defines the SimilarityMetric trait that lets the
//! SimilarityEngine score vector pairs with any metric.

/// Scores how alike two feature vectors are.
///
/// ## Design Note
/// - `Send + Sync` lets the engine evaluate the metric from rayon workers
/// - Implementations must be symmetric: `similarity(a, b) == similarity(b, a)`
/// - Implementations must not return NaN; degenerate input maps to 0.0
pub trait SimilarityMetric: Send + Sync {
    /// Returns the name of this metric (for logging/debugging)
    fn name(&self) -> &str;

    /// Similarity of two equally sized vectors; higher means more alike.
    fn similarity(&self, a: &[f64], b: &[f64]) -> f64;
}
