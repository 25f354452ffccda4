//! Error types for the eight-puzzle crate

use thiserror::Error;

use crate::puzzle::Move;

/// Structural problems with a board supplied from outside the crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidBoard {
    #[error("expected {expected} cells, got {got}")]
    WrongCellCount { expected: usize, got: usize },

    #[error("label {label} at position {position} is out of range (must be 0-8)")]
    LabelOutOfRange { label: u8, position: usize },

    #[error("expected exactly one blank, found {count}")]
    BlankCount { count: usize },

    #[error("tile {label} appears {count} times")]
    DuplicateTile { label: u8, count: usize },

    #[error("tile {label} is missing")]
    MissingTile { label: u8 },

    #[error("cannot parse '{input}' as a board: {reason}")]
    Parse { input: String, reason: String },
}

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidBoard),

    #[error("puzzle is not solvable (explored {states_explored} states)")]
    Unsolvable { states_explored: usize },

    #[error("illegal move {mv}: blank at row {row}, column {col} would leave the grid")]
    IllegalMove { mv: Move, row: usize, col: usize },

    #[error("invalid move '{input}' (expected one of: up, down, left, right)")]
    ParseMove { input: String },

    #[error("no saved puzzle with id {id}")]
    UnknownPuzzle { id: u64 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
