//! Error types for the tictree crate

use thiserror::Error;

use crate::tictactoe::Side;

/// Main error type for the tictree crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: position {position} is already occupied")]
    InvalidMove { position: usize },

    #[error("position {position} is out of bounds (must be 0-8)")]
    InvalidPosition { position: usize },

    #[error("game already over")]
    GameOver,

    #[error("it is the {expected} side's turn to move")]
    OutOfTurn { expected: Side },

    #[error("node has no live children to move into")]
    NoChildren,

    #[error("tree allocation failed after {allocated} nodes (limit {limit})")]
    AllocationFailure { allocated: usize, limit: usize },

    #[error("node {id} is not live in the tree")]
    DanglingNode { id: u32 },

    #[error("no game tree has been built for this session yet")]
    TreeNotBuilt,

    #[error("opponent move input was closed")]
    InputClosed,

    #[error("board string too short: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid mark counts: opponent={opponent}, machine={machine} in '{context}'")]
    InvalidMarkCounts {
        opponent: usize,
        machine: usize,
        context: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid prune policy '{input}'. Expected one of: {expected}")]
    ParsePrunePolicy { input: String, expected: String },

    #[error("invalid side '{input}' (expected 'machine' or 'opponent')")]
    ParseSide { input: String },

    #[error("failed to parse TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
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
