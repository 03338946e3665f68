//! Configuration errors

use thiserror::Error;

/// Reasons a [`GameConfig`](super::GameConfig) is rejected at session construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The grid has no cells
    #[error("grid_size must be at least 1")]
    EmptyGrid,

    /// The grid is larger than coordinates can address
    #[error("grid_size must be at most {max}, got {got}")]
    GridTooLarge { max: usize, got: usize },

    /// The snake would never move
    #[error("initial_move_interval_ms must be positive")]
    ZeroMoveInterval,

    /// Speed-up floor is zero
    #[error("min_move_interval_ms must be positive")]
    ZeroMinInterval,

    /// Speed-up floor is slower than the starting speed
    #[error("min_move_interval_ms ({min}) cannot exceed initial_move_interval_ms ({initial})")]
    MinAboveInitial { min: u64, initial: u64 },
}
