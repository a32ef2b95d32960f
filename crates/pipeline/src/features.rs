//! Feature encoding for content-based similarity.
//!
//! Each game becomes a fixed-width numeric vector laid out as:
//!
//! ```text
//! [ one-hot platform | multi-hot genres | release_year | score ]
//! ```
//!
//! The platform and genre column universes are derived from exactly the
//! records being encoded, so vectors from two different encode calls are
//! not comparable. [`EncodedGames`] keeps the vectors together with the
//! [`FeatureSpace`] they were built against.

use data_loader::{GameId, GameRecord};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};

/// Number of numeric columns appended after the categorical blocks.
pub const NUMERIC_COLUMNS: usize = 2;

/// Column layout derived from a set of records.
///
/// Platforms and genres are sorted lexicographically, which makes the
/// layout independent of record order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSpace {
    platforms: Vec<String>,
    genres: Vec<String>,
    platform_columns: HashMap<String, usize>,
    genre_columns: HashMap<String, usize>,
}

impl FeatureSpace {
    /// Collect the distinct platforms and genre tags in `games`.
    pub fn from_games(games: &[GameRecord]) -> Self {
        let platforms: Vec<String> = games
            .iter()
            .map(|g| g.platform.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let genres: Vec<String> = games
            .iter()
            .flat_map(|g| g.genres.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let platform_columns = platforms
            .iter()
            .enumerate()
            .map(|(i, p)| (p.clone(), i))
            .collect();
        let genre_columns = genres
            .iter()
            .enumerate()
            .map(|(i, g)| (g.clone(), platforms.len() + i))
            .collect();

        Self {
            platforms,
            genres,
            platform_columns,
            genre_columns,
        }
    }

    pub fn platforms(&self) -> &[String] {
        &self.platforms
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Total vector width: `|platforms| + |genres| + 2`.
    pub fn dimension(&self) -> usize {
        self.platforms.len() + self.genres.len() + NUMERIC_COLUMNS
    }

    /// Column holding the one-hot bit for `platform`
    pub fn platform_column(&self, platform: &str) -> Option<usize> {
        self.platform_columns.get(platform).copied()
    }

    /// Column holding the multi-hot bit for `genre`
    pub fn genre_column(&self, genre: &str) -> Option<usize> {
        self.genre_columns.get(genre).copied()
    }

    /// Column of the raw release year.
    pub fn year_column(&self) -> usize {
        self.platforms.len() + self.genres.len()
    }

    /// Column of the raw review score.
    pub fn score_column(&self) -> usize {
        self.year_column() + 1
    }

    /// Encode a single record against this space.
    ///
    /// Platforms or genres that are not part of the space simply leave their
    /// block empty.
    pub fn encode(&self, game: &GameRecord) -> Vec<f64> {
        let mut values = vec![0.0; self.dimension()];

        if let Some(col) = self.platform_column(&game.platform) {
            values[col] = 1.0;
        }
        for genre in &game.genres {
            if let Some(col) = self.genre_column(genre) {
                values[col] = 1.0;
            }
        }

        // Appended unscaled: year and score keep their natural magnitudes
        values[self.year_column()] = game.release_year as f64;
        values[self.score_column()] = game.score;

        values
    }
}

/// The encoded form of one game.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub game_id: GameId,
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Vectors for a set of games plus the space they live in.
#[derive(Debug, Clone)]
pub struct EncodedGames {
    pub space: FeatureSpace,
    pub vectors: Vec<FeatureVector>,
}

/// Turns game records into feature vectors.
///
/// Stateless: the column universe is rebuilt from the input on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEncoder;

impl FeatureEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode `games` in parallel.
    ///
    /// # Returns
    /// One vector per record, in input order; `vectors[i].game_id == i`.
    pub fn encode(&self, games: &[GameRecord]) -> EncodedGames {
        let space = FeatureSpace::from_games(games);
        let vectors = games
            .par_iter()
            .enumerate()
            .map(|(game_id, game)| FeatureVector {
                game_id,
                values: space.encode(game),
            })
            .collect();

        EncodedGames { space, vectors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_games() -> Vec<GameRecord> {
        vec![
            GameRecord::new("Metroid Prime", "GameCube", "Action, Adventure", 2002, 9.7),
            GameRecord::new("Halo", "Xbox", "Shooter", 2001, 9.7),
            GameRecord::new("Fable", "Xbox", "Action, RPG", 2004, 9.0),
        ]
    }

    #[test]
    fn test_feature_space_layout() {
        let space = FeatureSpace::from_games(&create_test_games());

        assert_eq!(space.platforms(), ["GameCube", "Xbox"]);
        assert_eq!(space.genres(), ["Action", "Adventure", "RPG", "Shooter"]);
        assert_eq!(space.dimension(), 2 + 4 + 2);
        assert_eq!(space.platform_column("Xbox"), Some(1));
        assert_eq!(space.genre_column("Action"), Some(2));
        assert_eq!(space.year_column(), 6);
        assert_eq!(space.score_column(), 7);
    }

    #[test]
    fn test_one_hot_and_multi_hot() {
        let encoded = FeatureEncoder::new().encode(&create_test_games());

        assert_eq!(
            encoded.vectors[0].values,
            vec![1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 2002.0, 9.7]
        );
        assert_eq!(
            encoded.vectors[2].values,
            vec![0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 2004.0, 9.0]
        );
    }

    #[test]
    fn test_vectors_have_constant_width_and_input_order() {
        let games = create_test_games();
        let encoded = FeatureEncoder::new().encode(&games);

        assert_eq!(encoded.vectors.len(), games.len());
        for (i, vector) in encoded.vectors.iter().enumerate() {
            assert_eq!(vector.game_id, i);
            assert_eq!(vector.len(), encoded.space.dimension());
        }
    }

    #[test]
    fn test_layout_ignores_record_order() {
        let mut games = create_test_games();
        let forward = FeatureSpace::from_games(&games);
        games.reverse();
        let backward = FeatureSpace::from_games(&games);

        assert_eq!(forward.platforms(), backward.platforms());
        assert_eq!(forward.genres(), backward.genres());
    }

    #[test]
    fn test_space_depends_on_subset() {
        let games = create_test_games();
        let full = FeatureSpace::from_games(&games);
        let subset = FeatureSpace::from_games(&games[1..2]);

        assert_ne!(full.dimension(), subset.dimension());
        assert_eq!(subset.dimension(), 1 + 1 + 2);
    }

    #[test]
    fn test_empty_input() {
        let encoded = FeatureEncoder::new().encode(&[]);
        assert!(encoded.vectors.is_empty());
        assert_eq!(encoded.space.dimension(), NUMERIC_COLUMNS);
    }
}
