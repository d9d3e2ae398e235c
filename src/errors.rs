//! Errors used throughout the engine.
//!
//! One crate-wide error enum covers the validated boundaries: notation
//! parsing, position-record construction, move replay, and command parsing.
//! The chess kernels themselves (generation, apply/undo, perft, evaluation,
//! search) operate on already-validated state and are infallible.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("invalid move text '{0}'")]
    InvalidMoveText(String),

    #[error("invalid position record: {0}")]
    InvalidPositionRecord(String),

    #[error("illegal move '{0}' for the current position")]
    IllegalMove(String),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("missing argument for {0}")]
    MissingArgument(&'static str),

    #[error("invalid value '{value}' for option {name}")]
    InvalidOptionValue { name: String, value: String },
}
