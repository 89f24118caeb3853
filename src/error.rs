//! Error types for the fallible edges of the engine: move notation coming in
//! from drivers and engine configuration loaded from JSON.
//!
//! Ordinary play never produces these. A bad click or an illegal target is an
//! expected outcome and is reported as `false` by [`crate::game::Game`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckersError {
    /// A square name that does not lie on the 8x8 board.
    #[error("invalid square `{0}` (expected a1..h8)")]
    InvalidSquare(String),

    /// A move string that is not `from-to` or `fromxto`.
    #[error("invalid move notation `{0}`")]
    InvalidNotation(String),

    #[error("invalid engine config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type CheckersResult<T> = Result<T, CheckersError>;
