use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::GameError;

/// Minimum number of rows and columns of a board
pub const MIN_SIZE: usize = 10;
/// Minimum distance from any edge at which food may spawn
pub const MIN_EDGE: usize = 2;
/// Maximum offset of the starting head from the board center, per axis
pub const JITTER: isize = 2;
/// Length of the snake at the start of a game
pub const START_LEN: usize = 1;

const DEFAULT_MAX_SPAWN_ATTEMPTS: usize = 10_000;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of rows
    pub height: usize,
    /// Number of columns
    pub width: usize,
    /// Seed for start placement and food spawning; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Rejected food samples before falling back to a full scan
    #[serde(default = "default_max_spawn_attempts")]
    pub max_spawn_attempts: usize,
}

fn default_max_spawn_attempts() -> usize {
    DEFAULT_MAX_SPAWN_ATTEMPTS
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: 20,
            width: 20,
            seed: None,
            max_spawn_attempts: DEFAULT_MAX_SPAWN_ATTEMPTS,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(MIN_SIZE, MIN_SIZE)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// JSON form accepted by [`GameConfig::from_json_file`]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize config")
    }

    /// Size of the state-id space, `3 * height^2 * width^2`
    ///
    /// `None` when the value does not fit in an `i64`.
    pub fn n_states(&self) -> Option<u64> {
        let h = self.height as u64;
        let w = self.width as u64;
        let n = h
            .checked_mul(h)?
            .checked_mul(w)?
            .checked_mul(w)?
            .checked_mul(3)?;
        (n <= i64::MAX as u64).then_some(n)
    }

    /// Check the dimensions, returning the state-space size on success
    pub fn validate(&self) -> Result<u64, GameError> {
        let invalid = GameError::InvalidDimensions {
            height: self.height,
            width: self.width,
        };
        if self.height < MIN_SIZE || self.width < MIN_SIZE {
            return Err(invalid);
        }
        self.n_states().ok_or(invalid)
    }
}
