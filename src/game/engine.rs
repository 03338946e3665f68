use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use super::{
    config::{BoundaryPolicy, GameConfig},
    error::ConfigError,
    state::{CollisionType, GameState, Position, Snake},
};

/// What a single tick did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is over or paused; nothing changed
    Idle,
    /// The snake moved one cell
    Moved,
    /// The snake moved onto the food and grew
    Ate,
    /// The snake crashed and the game is over
    Collided(CollisionType),
}

impl TickOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickOutcome::Collided(_))
    }
}

/// The game engine that handles all game logic
#[derive(Debug)]
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine, rejecting configurations with no valid grid
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::from_entropy(),
        })
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Fresh state: a one-cell snake in the middle of the grid, heading right
    pub fn new_game(&mut self) -> GameState {
        let center = (self.config.grid_size / 2) as i32;
        let snake = Snake::new(Position::new(center, center));

        let mut state = GameState::new(
            snake,
            None,
            self.config.grid_size,
            self.config.initial_move_interval_ms,
        );
        self.relocate_food(&mut state);
        state
    }

    /// Advance the game by one cell.
    ///
    /// Order within a tick is fixed: apply the next queued turn, move the
    /// head, check walls and the body, then either grow onto food or drop
    /// the tail. A crash leaves snake, score and food untouched.
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        if state.is_over || state.is_paused {
            return TickOutcome::Idle;
        }

        if let Some(direction) = state.input.consume() {
            state.direction = direction;
        }

        let stepped = state.snake.head().moved_in_direction(state.direction);
        let new_head = match self.config.boundary {
            BoundaryPolicy::Bounded => {
                if !state.is_in_bounds(stepped) {
                    state.is_over = true;
                    return TickOutcome::Collided(CollisionType::Wall);
                }
                stepped
            }
            BoundaryPolicy::Wrapping => stepped.wrapped(state.grid_size),
        };

        // The tail has not moved yet, so stepping onto it counts as a crash
        if state.snake.occupies(new_head) {
            state.is_over = true;
            return TickOutcome::Collided(CollisionType::SelfCollision);
        }

        let ate_food = state.food == Some(new_head);
        state.snake.advance(new_head, ate_food);
        state.steps += 1;

        if !ate_food {
            return TickOutcome::Moved;
        }

        state.score = state.score.saturating_add(self.config.food_reward);
        self.relocate_food(state);
        self.speed_up(state);

        TickOutcome::Ate
    }

    /// Put the food on a random cell the snake does not cover.
    /// Leaves no food when the snake covers the whole grid.
    pub fn relocate_food(&mut self, state: &mut GameState) {
        state.food = self.spawn_food_avoid_snake(&state.snake, state.grid_size);
    }

    fn speed_up(&self, state: &mut GameState) {
        let step = self.config.speed_increase_step_ms;
        let floor = self.config.min_move_interval_ms;
        if step == 0 || state.move_interval_ms <= floor {
            return;
        }
        state.move_interval_ms = state.move_interval_ms.saturating_sub(step).max(floor);
    }

    /// Rejection sampling first; once the board is crowded enough for that
    /// to keep missing, pick directly from the free cells.
    fn spawn_food_avoid_snake(&mut self, snake: &Snake, grid_size: usize) -> Option<Position> {
        let cells = grid_size * grid_size;
        if snake.len() >= cells {
            return None;
        }

        let size = grid_size as i32;
        for _ in 0..cells * 4 {
            let pos = Position::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
            if !snake.occupies(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = (0..size)
            .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}
