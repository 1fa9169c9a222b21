//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Drivers step the engine and read the board through shared references only.

pub mod action;
pub mod config;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use action::{Action, N_ACTIONS};
pub use config::{GameConfig, JITTER, MIN_EDGE, MIN_SIZE, START_LEN};
pub use encoding::{TERMINAL_STATE, encode_state};
pub use engine::{CollisionType, GameEngine, StepResult};
pub use error::GameError;
pub use state::{Board, Position, Tile};
