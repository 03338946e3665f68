//! Session lifecycle around a single [`GameState`]
//!
//! A session owns the engine, the current game and the best score seen so
//! far. It moves through `NotStarted -> Running <-> Paused -> GameOver`, and
//! only an explicit reset or restart leaves `GameOver`. The driver calls
//! [`Session::tick`] on its timer and reads [`Session::snapshot`] to draw.

use std::time::Duration;

use tracing::{debug, info};

use super::{
    config::GameConfig,
    direction::Direction,
    engine::{GameEngine, TickOutcome},
    error::ConfigError,
    state::{GameState, Position},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for an explicit start; no ticking
    NotStarted,
    Running,
    /// Ticking suspended, movement input ignored
    Paused,
    /// Terminal until reset or restart
    GameOver,
}

/// Emitted by [`Session::tick`] when a game ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    GameOver { score: u32 },
    /// The game ended above the previous best; the host should persist it
    NewHighScore(u32),
}

/// Read-only copy of everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Head first
    pub snake: Vec<Position>,
    pub food: Option<Position>,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub grid_size: usize,
    pub move_interval_ms: u64,
    pub is_over: bool,
    pub is_paused: bool,
    pub phase: SessionPhase,
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}

#[derive(Debug)]
pub struct Session {
    engine: GameEngine,
    state: GameState,
    phase: SessionPhase,
    high_score: u32,
}

impl Session {
    /// Build a session; `high_score` is only shown, it never affects play
    pub fn new(config: GameConfig, high_score: u32) -> Result<Self, ConfigError> {
        Ok(Self::from_engine(GameEngine::new(config)?, high_score))
    }

    /// Like [`Session::new`] with reproducible food placement
    pub fn with_seed(config: GameConfig, high_score: u32, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self::from_engine(GameEngine::with_seed(config, seed)?, high_score))
    }

    fn from_engine(mut engine: GameEngine, high_score: u32) -> Self {
        let state = engine.new_game();
        Self {
            engine,
            state,
            phase: SessionPhase::NotStarted,
            high_score,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Period the driver should tick at right now
    pub fn move_interval(&self) -> Duration {
        Duration::from_millis(self.state.move_interval_ms)
    }

    pub fn start(&mut self) -> bool {
        if self.phase != SessionPhase::NotStarted {
            debug!(phase = ?self.phase, "start ignored");
            return false;
        }
        self.phase = SessionPhase::Running;
        info!(grid_size = self.state.grid_size, "game started");
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != SessionPhase::Running {
            debug!(phase = ?self.phase, "pause ignored");
            return false;
        }
        self.phase = SessionPhase::Paused;
        self.state.is_paused = true;
        debug!(score = self.state.score, "game paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != SessionPhase::Paused {
            debug!(phase = ?self.phase, "resume ignored");
            return false;
        }
        self.phase = SessionPhase::Running;
        self.state.is_paused = false;
        debug!(score = self.state.score, "game resumed");
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            SessionPhase::Running => self.pause(),
            SessionPhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Throw the current game away and wait for a new start
    pub fn reset(&mut self) {
        self.state = self.engine.new_game();
        self.phase = SessionPhase::NotStarted;
        debug!("session reset");
    }

    /// Reset and immediately start a new game
    pub fn restart(&mut self) -> bool {
        self.reset();
        self.start()
    }

    /// Forward a turn to the input queue. Only accepted while running.
    pub fn offer_direction(&mut self, direction: Direction) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.state.offer_direction(direction)
    }

    /// Advance the game by one cell if running
    pub fn tick(&mut self) -> Option<SessionEvent> {
        if self.phase != SessionPhase::Running {
            return None;
        }

        match self.engine.tick(&mut self.state) {
            TickOutcome::Collided(collision) => {
                self.phase = SessionPhase::GameOver;
                let score = self.state.score;
                info!(score, ?collision, steps = self.state.steps, "game over");

                if score > self.high_score {
                    info!(previous = self.high_score, score, "new high score");
                    self.high_score = score;
                    Some(SessionEvent::NewHighScore(score))
                } else {
                    Some(SessionEvent::GameOver { score })
                }
            }
            TickOutcome::Ate => {
                debug!(score = self.state.score, interval_ms = self.state.move_interval_ms, "food eaten");
                None
            }
            TickOutcome::Moved | TickOutcome::Idle => None,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.state.snake.body.iter().copied().collect(),
            food: self.state.food,
            direction: self.state.direction,
            score: self.state.score,
            high_score: self.high_score,
            grid_size: self.state.grid_size,
            move_interval_ms: self.state.move_interval_ms,
            is_over: self.state.is_over,
            is_paused: self.state.is_paused,
            phase: self.phase,
        }
    }
}
