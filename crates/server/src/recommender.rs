//! # Game Recommender
//!
//! This module answers "games like this one" queries:
//! 1. Look up the query title (first exact match)
//! 2. Encode every game in the dataset
//! 3. Build the full cosine similarity matrix
//! 4. Rank the query's row, excluding the query itself
//! 5. Return the top N with their display attributes
//!
//! Steps 2 and 3 are redone on every call. Nothing derived from the dataset
//! outlives a request.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use data_loader::{GameDataset, GameId};
use pipeline::{RankedMatch, SimilarityPipeline};

use crate::error::{RecommendError, RecommendResult};

/// A recommended game as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecommendation {
    pub title: String,
    pub platform: String,
    /// Genre tags joined with `", "`, as stored in the source data
    pub genre: String,
    pub score: f64,
}

/// Content-based recommender over a shared, read-only dataset.
#[derive(Clone)]
pub struct GameRecommender {
    dataset: Arc<GameDataset>,
    pipeline: SimilarityPipeline,
}

impl GameRecommender {
    pub fn new(dataset: Arc<GameDataset>) -> Self {
        Self {
            dataset,
            pipeline: SimilarityPipeline::new(),
        }
    }

    pub fn dataset(&self) -> &Arc<GameDataset> {
        &self.dataset
    }

    /// Main entry point: games most similar to `title`.
    ///
    /// # Arguments
    /// * `title` - Exact, case-sensitive title of the query game
    /// * `limit` - Maximum number of recommendations; 0 yields an empty list
    ///
    /// # Returns
    /// Up to `limit` games ordered by similarity (highest first). Equal
    /// scores keep dataset order.
    ///
    /// # Errors
    /// [`RecommendError::NotFound`] when no game has this title.
    pub fn recommend(&self, title: &str, limit: usize) -> RecommendResult<Vec<GameRecommendation>> {
        let start_time = Instant::now();

        let query = self
            .dataset
            .find_title(title)
            .ok_or_else(|| RecommendError::NotFound(title.to_string()))?;

        if limit == 0 {
            return Ok(Vec::new());
        }

        let matches = self.pipeline.rank(self.dataset.games(), query, limit)?;
        let recommendations = self.enrich(&matches);

        info!(
            "Recommended {} games for {:?} (game {}) in {:.2?}",
            recommendations.len(),
            title,
            query,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Attach display attributes to ranked matches.
    fn enrich(&self, matches: &[RankedMatch]) -> Vec<GameRecommendation> {
        matches
            .iter()
            .filter_map(|m| match self.dataset.get_game(m.game_id) {
                Some(game) => Some(GameRecommendation {
                    title: game.title.clone(),
                    platform: game.platform.clone(),
                    genre: game.genre_label(),
                    score: game.score,
                }),
                None => {
                    warn!("Ranked game {} is missing from the dataset", m.game_id);
                    None
                }
            })
            .collect()
    }

    /// Id of the first game with this exact title.
    pub fn lookup(&self, title: &str) -> Option<GameId> {
        self.dataset.find_title(title)
    }
}
