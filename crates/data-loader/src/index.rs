//! GameDataset loading and integrity checks.
//!
//! Loading is a one-shot step at process start: parse the CSV, drop the
//! rows the cleaning rules reject, build the title index, then validate.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::{info, warn};

impl GameDataset {
    /// Load and clean the review dataset from a CSV file.
    ///
    /// Steps:
    /// 1. Parse the CSV (dropping incomplete and sentinel-year rows)
    /// 2. Insert records in file order, building the title index
    /// 3. Validate data integrity
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading review dataset from {:?}", path);

        let outcome = parser::parse_reviews(path)?;
        if outcome.dropped_incomplete > 0 || outcome.dropped_sentinel_year > 0 {
            warn!(
                "Dropped {} incomplete rows and {} rows with release year {}",
                outcome.dropped_incomplete, outcome.dropped_sentinel_year, SENTINEL_YEAR
            );
        }

        let dataset = GameDataset::from_records(outcome.records);
        dataset.validate()?;

        info!(
            "Loaded {} reviews ({} distinct titles)",
            dataset.len(),
            dataset.title_index.len()
        );
        Ok(dataset)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - No record carries the sentinel release year
    /// - Every record has at least one genre tag
    /// - Every score is finite
    /// - The title index points at the first record with each title
    pub fn validate(&self) -> Result<()> {
        for (id, game) in self.games.iter().enumerate() {
            if game.release_year == SENTINEL_YEAR {
                return Err(DataLoadError::ValidationError(format!(
                    "{} has sentinel release year {}",
                    game.title, SENTINEL_YEAR
                )));
            }
            if game.genres.is_empty() {
                return Err(DataLoadError::ValidationError(format!(
                    "{} has no genre tags",
                    game.title
                )));
            }
            if !game.score.is_finite() {
                return Err(DataLoadError::ValidationError(format!(
                    "{} has non-finite score",
                    game.title
                )));
            }
            match self.title_index.get(&game.title) {
                Some(&first) if first <= id => {}
                _ => {
                    return Err(DataLoadError::ValidationError(format!(
                        "title index out of sync for {}",
                        game.title
                    )));
                }
            }
        }
        Ok(())
    }
}
