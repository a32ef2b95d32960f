//! Top-N ranking over a similarity matrix row.

use crate::error::Result;
use crate::features::FeatureEncoder;
use crate::similarity::{CosineSimilarity, SimilarityEngine, SimilarityMatrix};
use crate::traits::SimilarityMetric;
use data_loader::{GameId, GameRecord};
use std::cmp::Ordering;
use std::time::Instant;
use tracing::{debug, instrument};

/// One ranked neighbour of the query game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedMatch {
    pub game_id: GameId,
    pub similarity: f64,
}

/// Rank every entry of `row` except `exclude`, highest similarity first.
///
/// ## Algorithm
/// 1. Pair each column index with its score
/// 2. Drop the query's own column (by index, not by rank position)
/// 3. Stable sort descending; equal scores keep column order
/// 4. Keep the first `limit`
pub fn rank_row(row: &[f64], exclude: GameId, limit: usize) -> Vec<RankedMatch> {
    if limit == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<RankedMatch> = row
        .iter()
        .enumerate()
        .filter(|(game_id, _)| *game_id != exclude)
        .map(|(game_id, &similarity)| RankedMatch {
            game_id,
            similarity,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}

impl SimilarityMatrix {
    /// The `limit` rows most similar to `query`, excluding `query` itself.
    pub fn top_matches(&self, query: GameId, limit: usize) -> Result<Vec<RankedMatch>> {
        Ok(rank_row(self.row(query)?, query, limit))
    }
}

/// Encode, score, and rank in one call.
///
/// Every call re-encodes the full record set and rebuilds the matrix, so
/// the vectors always match the records they are ranked against.
///
/// ## Usage
/// ```ignore
/// let pipeline = SimilarityPipeline::new();
/// let matches = pipeline.rank(dataset.games(), query_id, 5)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimilarityPipeline<M = CosineSimilarity> {
    encoder: FeatureEncoder,
    engine: SimilarityEngine<M>,
}

impl SimilarityPipeline<CosineSimilarity> {
    pub fn new() -> Self {
        Self {
            encoder: FeatureEncoder::new(),
            engine: SimilarityEngine::new(),
        }
    }
}

impl<M: SimilarityMetric> SimilarityPipeline<M> {
    /// Pipeline scoring with a custom metric (builder style).
    pub fn with_engine(engine: SimilarityEngine<M>) -> Self {
        Self {
            encoder: FeatureEncoder::new(),
            engine,
        }
    }

    /// Rank `games` by similarity to `games[query]`.
    #[instrument(skip(self, games), fields(game_count = games.len()))]
    pub fn rank(
        &self,
        games: &[GameRecord],
        query: GameId,
        limit: usize,
    ) -> Result<Vec<RankedMatch>> {
        let start = Instant::now();

        let encoded = self.encoder.encode(games);
        debug!(
            "Encoded {} games into {} columns",
            encoded.vectors.len(),
            encoded.space.dimension()
        );

        let matrix = self.engine.compute(&encoded.vectors)?;
        let matches = matrix.top_matches(query, limit)?;

        debug!(
            "Ranked {} matches for game {} in {:.2?}",
            matches.len(),
            query,
            start.elapsed()
        );
        Ok(matches)
    }
}
