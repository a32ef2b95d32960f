//! Core domain types for the game review dataset.
//!
//! This module defines the record type shared by every crate in the
//! workspace, the in-memory dataset that owns those records, and the
//! result rows produced by the aggregation queries in [`crate::stats`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Stable identifier of a game: its row position in the loaded dataset.
///
/// Feature vectors and similarity matrix rows are laid out in this order,
/// so an id doubles as the row index everywhere downstream.
pub type GameId = usize;

/// Separator between genre tags in the source `genre` column.
pub const GENRE_DELIMITER: &str = ", ";

/// Release year the upstream scrape uses for "unknown". Rows carrying it
/// are dropped at load time.
pub const SENTINEL_YEAR: i32 = 1970;

// =============================================================================
// Game Record
// =============================================================================

/// One reviewed game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub title: String,
    pub platform: String,
    /// Genre tags in source order, already split on [`GENRE_DELIMITER`].
    pub genres: Vec<String>,
    pub release_year: i32,
    /// Month of release (1-12), only used by the monthly aggregation
    pub release_month: Option<u8>,
    pub score: f64,
}

impl GameRecord {
    /// Build a record from a delimited genre field such as `"Action, RPG"`.
    pub fn new(
        title: impl Into<String>,
        platform: impl Into<String>,
        genre_field: &str,
        release_year: i32,
        score: f64,
    ) -> Self {
        Self {
            title: title.into(),
            platform: platform.into(),
            genres: split_genres(genre_field),
            release_year,
            release_month: None,
            score,
        }
    }

    /// Set the release month (builder style, mostly for fixtures).
    pub fn with_release_month(mut self, month: u8) -> Self {
        self.release_month = Some(month);
        self
    }

    /// Genre tags re-joined the way the source dataset stores them.
    pub fn genre_label(&self) -> String {
        self.genres.join(GENRE_DELIMITER)
    }
}

/// Split a delimited genre field into its tags.
///
/// Empty fragments are dropped so that `""` yields no tags at all.
pub fn split_genres(field: &str) -> Vec<String> {
    field
        .split(GENRE_DELIMITER)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Statistics Types
// =============================================================================

/// Number of reviews for one release year.
///
/// The count is serialized as `title` because that is the column name the
/// charting frontend reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub release_year: i32,
    #[serde(rename = "title")]
    pub count: usize,
}

/// Number of reviews for one calendar month, serialized as `[month, count]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount(pub u8, pub usize);

/// Average score and game count for one (normalised) genre tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreStats {
    pub genre: String,
    pub average_score: f64,
    pub num_games: usize,
}

/// Review counts per platform family for one release year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformYearCounts {
    pub release_year: i32,
    #[serde(rename = "PC")]
    pub pc: usize,
    #[serde(rename = "Nintendo")]
    pub nintendo: usize,
    #[serde(rename = "PlayStation")]
    pub playstation: usize,
    #[serde(rename = "Xbox")]
    pub xbox: usize,
    #[serde(rename = "Mobile")]
    pub mobile: usize,
    #[serde(rename = "Sega")]
    pub sega: usize,
    #[serde(rename = "Other")]
    pub other: usize,
}

// =============================================================================
// GameDataset - The Immutable Base Dataset
// =============================================================================

/// The cleaned review dataset.
///
/// Built once at startup and then shared read-only (usually behind an
/// `Arc`) by the recommender and the HTTP layer. Records keep their load
/// order; `title_index` maps each title to the first record carrying it.
#[derive(Debug, Default)]
pub struct GameDataset {
    pub(crate) games: Vec<GameRecord>,
    pub(crate) title_index: HashMap<String, GameId>,
}

impl GameDataset {
    /// Creates a new, empty dataset
    pub fn new() -> Self {
        Self {
            games: Vec::new(),
            title_index: HashMap::new(),
        }
    }

    /// Build a dataset from already-cleaned records, keeping their order.
    pub fn from_records(records: Vec<GameRecord>) -> Self {
        let mut dataset = Self::new();
        for record in records {
            dataset.insert_game(record);
        }
        dataset
    }

    /// All records in load order
    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    /// Get a record by id
    pub fn get_game(&self, id: GameId) -> Option<&GameRecord> {
        self.games.get(id)
    }

    /// Id of the first record whose title matches exactly (case-sensitive).
    pub fn find_title(&self, title: &str) -> Option<GameId> {
        self.title_index.get(title).copied()
    }

    /// Case-insensitive substring search over titles.
    ///
    /// Exact (case-insensitive) matches come first, then substring matches,
    /// each group ordered by score descending.
    pub fn search_titles(&self, query: &str) -> Vec<GameId> {
        let needle = query.to_lowercase();
        let mut matches: Vec<(u8, GameId)> = self
            .games
            .iter()
            .enumerate()
            .filter_map(|(id, game)| {
                let title = game.title.to_lowercase();
                if title == needle {
                    Some((0, id))
                } else if title.contains(&needle) {
                    Some((1, id))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| {
            a.0.cmp(&b.0).then_with(|| {
                self.games[b.1]
                    .score
                    .partial_cmp(&self.games[a.1].score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });
        matches.into_iter().map(|(_, id)| id).collect()
    }

    /// Append a record. Returns its id.
    pub fn insert_game(&mut self, game: GameRecord) -> GameId {
        let id = self.games.len();
        self.title_index.entry(game.title.clone()).or_insert(id);
        self.games.push(game);
        id
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
