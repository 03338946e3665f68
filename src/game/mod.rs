//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A driver calls [`Session::tick`] on a timer and draws from [`Session::snapshot`].

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod input;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use config::{BoundaryPolicy, GameConfig, MAX_GRID_SIZE};
pub use direction::Direction;
pub use engine::{GameEngine, TickOutcome};
pub use error::ConfigError;
pub use input::{INPUT_QUEUE_CAPACITY, InputQueue};
pub use session::{GameSnapshot, Session, SessionEvent, SessionPhase};
pub use state::{CollisionType, GameState, Position, Snake};
