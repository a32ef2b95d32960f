//! Pairwise similarity over encoded games.
//!
//! The engine computes a dense `n x n` matrix with exact pairwise scores.
//! That is O(n² · d) work and memory, which is fine for a dataset of a few
//! thousand reviews and nothing larger.

use crate::error::{PipelineError, Result};
use crate::features::FeatureVector;
use crate::traits::SimilarityMetric;
use rayon::prelude::*;
use tracing::debug;

/// Cosine of the angle between two vectors.
///
/// Returns 0.0 when either vector has zero norm, and for any non-finite
/// intermediate result, so degenerate inputs never poison a ranking.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineSimilarity;

impl SimilarityMetric for CosineSimilarity {
    fn name(&self) -> &str {
        "cosine"
    }

    fn similarity(&self, a: &[f64], b: &[f64]) -> f64 {
        cosine_similarity(a, b)
    }
}

/// Free-function form of [`CosineSimilarity`].
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = norm(a);
    let norm_b = norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let cos = dot / (norm_a * norm_b);
    if cos.is_finite() {
        cos.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Dense, row-major square matrix of similarity scores.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Number of rows (and columns).
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Score between rows `i` and `j`.
    ///
    /// # Panics
    /// If either index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.size && j < self.size, "index out of bounds");
        self.values[i * self.size + j]
    }

    /// All scores of row `i`, indexed by column.
    pub fn row(&self, i: usize) -> Result<&[f64]> {
        if i >= self.size {
            return Err(PipelineError::RowOutOfBounds {
                row: i,
                size: self.size,
            });
        }
        Ok(&self.values[i * self.size..(i + 1) * self.size])
    }
}

/// Builds similarity matrices with a pluggable metric.
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine<M = CosineSimilarity> {
    metric: M,
}

impl SimilarityEngine<CosineSimilarity> {
    /// Engine using cosine similarity.
    pub fn new() -> Self {
        Self {
            metric: CosineSimilarity,
        }
    }
}

impl<M: SimilarityMetric> SimilarityEngine<M> {
    /// Engine using a custom metric.
    pub fn with_metric(metric: M) -> Self {
        Self { metric }
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Compute the full pairwise matrix. Rows are filled in parallel.
    ///
    /// # Errors
    /// [`PipelineError::DimensionMismatch`] when the vectors do not all have
    /// the same width.
    pub fn compute(&self, vectors: &[FeatureVector]) -> Result<SimilarityMatrix> {
        if let Some(first) = vectors.first() {
            let expected = first.len();
            if let Some(bad) = vectors.iter().find(|v| v.len() != expected) {
                return Err(PipelineError::DimensionMismatch {
                    game_id: bad.game_id,
                    expected,
                    found: bad.len(),
                });
            }
        }

        let size = vectors.len();
        let mut values = vec![0.0; size * size];

        if size > 0 {
            values
                .par_chunks_mut(size)
                .zip(vectors.par_iter())
                .for_each(|(row, a)| {
                    for (cell, b) in row.iter_mut().zip(vectors) {
                        *cell = self.metric.similarity(&a.values, &b.values);
                    }
                });
        }

        debug!(
            "Computed {}x{} {} similarity matrix",
            size,
            size,
            self.metric.name()
        );
        Ok(SimilarityMatrix { size, values })
    }
}
