use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::ConfigError;

/// Largest grid edge accepted; keeps every coordinate well inside `i32`
pub const MAX_GRID_SIZE: usize = 1000;

/// What happens when the head leaves the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Leaving the grid ends the game
    #[default]
    Bounded,
    /// The head re-enters from the opposite edge
    Wrapping,
}

/// Configuration for a game session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length of the square grid, in cells
    pub grid_size: usize,
    /// Time between ticks at the start of a game
    pub initial_move_interval_ms: u64,
    /// How much faster each eaten food makes the snake (0 disables)
    pub speed_increase_step_ms: u64,
    /// Floor for the move interval when speeding up
    pub min_move_interval_ms: u64,
    /// Rule for the snake leaving the grid
    pub boundary: BoundaryPolicy,
    /// Points awarded per food
    pub food_reward: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_move_interval_ms: 150,
            speed_increase_step_ms: 5,
            min_move_interval_ms: 50,
            boundary: BoundaryPolicy::Bounded,
            food_reward: 10,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Same configuration with a different boundary policy
    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config in {:?}", path))
    }

    /// Check that a valid grid and a positive tick period exist
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                max: MAX_GRID_SIZE,
                got: self.grid_size,
            });
        }

        if self.initial_move_interval_ms == 0 {
            return Err(ConfigError::ZeroMoveInterval);
        }

        if self.min_move_interval_ms == 0 {
            return Err(ConfigError::ZeroMinInterval);
        }

        if self.min_move_interval_ms > self.initial_move_interval_ms {
            return Err(ConfigError::MinAboveInitial {
                min: self.min_move_interval_ms,
                initial: self.initial_move_interval_ms,
            });
        }

        Ok(())
    }
}
