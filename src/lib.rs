//! Snake - a single-player terminal Snake game
//!
//! This library provides:
//! - Core game logic and session lifecycle (game module)
//! - Best-score persistence (highscore module)
//! - Keyboard mapping (input module) and TUI rendering (render module)
//! - The interactive terminal driver (modes module)

pub mod game;
pub mod highscore;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
