//! # Data Loader Crate
//!
//! This crate handles loading, cleaning, and aggregating the video-game
//! review dataset.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (GameRecord, GameDataset, statistics rows)
//! - **parser**: Parse the review CSV into records, applying cleaning rules
//! - **index**: Load a dataset from disk and validate it
//! - **stats**: Aggregations behind the charting endpoints
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::GameDataset;
//! use std::path::Path;
//!
//! let dataset = GameDataset::load_from_file(Path::new("data/merged_data.csv"))?;
//!
//! let id = dataset.find_title("Portal 2").unwrap();
//! let game = dataset.get_game(id).unwrap();
//! println!("{} on {} scored {}", game.title, game.platform, game.score);
//!
//! for row in dataset.reviews_by_year() {
//!     println!("{}: {}", row.release_year, row.count);
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod stats;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use stats::PlatformFamily;
pub use types::{
    GENRE_DELIMITER,
    GameDataset,
    GameId,
    GameRecord,
    GenreStats,
    MonthCount,
    PlatformYearCounts,
    SENTINEL_YEAR,
    YearCount,
    split_genres,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_creation() {
        let dataset = GameDataset::new();
        assert_eq!(dataset.len(), 0);
        assert!(dataset.is_empty());
        assert!(dataset.find_title("anything").is_none());
    }

    #[test]
    fn test_insert_game() {
        let mut dataset = GameDataset::new();

        let id = dataset.insert_game(GameRecord::new(
            "Chrono Trigger",
            "Super NES",
            "Role-playing (RPG)",
            1995,
            10.0,
        ));

        assert_eq!(id, 0);
        let retrieved = dataset.get_game(id).unwrap();
        assert_eq!(retrieved.title, "Chrono Trigger");
        assert_eq!(retrieved.genres, vec!["Role-playing (RPG)"]);
    }

    #[test]
    fn test_find_title_is_exact_and_first_wins() {
        let dataset = GameDataset::from_records(vec![
            GameRecord::new("Doom", "PC", "Shooter", 1993, 9.0),
            GameRecord::new("Doom", "PlayStation", "Shooter", 1995, 8.0),
        ]);

        assert_eq!(dataset.find_title("Doom"), Some(0));
        assert_eq!(dataset.find_title("doom"), None);
        assert_eq!(dataset.find_title("Doom "), None);
    }

    #[test]
    fn test_genre_split_and_label() {
        let game = GameRecord::new("Bastion", "PC", "Action, RPG", 2011, 9.0);
        assert_eq!(game.genres, vec!["Action", "RPG"]);
        assert_eq!(game.genre_label(), "Action, RPG");
        assert!(split_genres("").is_empty());
    }

    #[test]
    fn test_search_titles() {
        let dataset = GameDataset::from_records(vec![
            GameRecord::new("Halo 2", "Xbox", "Shooter", 2004, 9.0),
            GameRecord::new("Halo", "Xbox", "Shooter", 2001, 9.5),
            GameRecord::new("Halo 3", "Xbox 360", "Shooter", 2007, 9.5),
            GameRecord::new("Tetris", "NES", "Puzzle", 1989, 9.0),
        ]);

        let hits = dataset.search_titles("halo");
        // Exact match first, then substring matches by score
        assert_eq!(hits, vec![1, 2, 0]);
        assert!(dataset.search_titles("zelda").is_empty());
    }
}
