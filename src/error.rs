//! Error types for the engine

use thiserror::Error;

use crate::board::{Coord, Token};

/// Main error type for the engine
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("coordinate {coord} is outside the {width}x{height} board")]
    OutOfRange {
        coord: Coord,
        width: usize,
        height: usize,
    },

    #[error("square {coord} is already occupied")]
    Occupied { coord: Coord },

    #[error("wrong player's move: {expected} is to move, got {got}")]
    WrongTurn { expected: Token, got: Token },

    #[error("only X or O can be placed on the board")]
    EmptyToken,

    #[error("game already over")]
    GameOver,

    #[error("no move available: the position is already decided or the board is full")]
    NoMoveAvailable,

    #[error("search interrupted before completion")]
    SearchInterrupted,

    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("cannot parse '{input}' as a coordinate (expected e.g. 3,2)")]
    ParseCoord { input: String },

    #[error("configuration parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
