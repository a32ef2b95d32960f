//! Content-based similarity pipeline for game recommendations.
//!
//! This crate provides:
//! - FeatureEncoder for turning game records into numeric vectors
//! - SimilarityMetric trait and the cosine implementation
//! - SimilarityEngine for building the pairwise similarity matrix
//! - Ranking helpers and SimilarityPipeline for the end-to-end query
//!
//! ## Architecture
//! The pipeline processes a query in stages:
//! 1. FeatureEncoder derives the column layout and encodes every record
//! 2. SimilarityEngine scores every pair of vectors
//! 3. The query's row is ranked, excluding the query itself
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FeatureEncoder, SimilarityEngine};
//!
//! let encoded = FeatureEncoder::new().encode(dataset.games());
//! let matrix = SimilarityEngine::new().compute(&encoded.vectors)?;
//! let top = matrix.top_matches(query_id, 5)?;
//! ```

pub mod error;
pub mod traits;
pub mod features;
pub mod similarity;
pub mod ranking;

// Re-export main types
pub use error::{PipelineError, Result};
pub use traits::SimilarityMetric;
pub use features::{EncodedGames, FeatureEncoder, FeatureSpace, FeatureVector};
pub use similarity::{CosineSimilarity, SimilarityEngine, SimilarityMatrix, cosine_similarity};
pub use ranking::{RankedMatch, SimilarityPipeline, rank_row};
