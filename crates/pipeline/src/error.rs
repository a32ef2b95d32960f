//! Error types for the similarity pipeline.

use data_loader::GameId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// A vector's width differs from the first vector handed to the engine
    #[error("Vector for game {game_id} has {found} columns, expected {expected}")]
    DimensionMismatch {
        game_id: GameId,
        expected: usize,
        found: usize,
    },

    /// Asked to rank a row the matrix does not have
    #[error("Row {row} is out of bounds for a {size}x{size} similarity matrix")]
    RowOutOfBounds { row: usize, size: usize },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
