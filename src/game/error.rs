use thiserror::Error;

/// Errors surfaced by the game engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid board dimensions {height}x{width}")]
    InvalidDimensions { height: usize, width: usize },

    #[error("invalid action code {0} (expected 0..=3)")]
    InvalidAction(i64),

    #[error("no empty cell left to spawn food")]
    BoardFull,
}
