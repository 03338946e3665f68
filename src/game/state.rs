use std::collections::VecDeque;

use super::direction::Direction;
use super::input::InputQueue;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Fold both coordinates back onto a `grid_size` square
    pub fn wrapped(&self, grid_size: usize) -> Self {
        let size = grid_size as i32;
        Self {
            x: self.x.rem_euclid(size),
            y: self.y.rem_euclid(size),
        }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at the front
    pub body: VecDeque<Position>,
}

impl Snake {
    /// Create a single-cell snake
    pub fn new(head: Position) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Create a snake from explicit cells, head first
    #[cfg(test)]
    pub(crate) fn from_cells(cells: impl IntoIterator<Item = Position>) -> Self {
        Self {
            body: cells.into_iter().collect(),
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push a new head; drop the tail unless growing
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);

        if !grow {
            self.body.pop_back();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only once the snake fills every cell
    pub food: Option<Position>,
    pub direction: Direction,
    pub input: InputQueue,
    pub grid_size: usize,
    pub score: u32,
    pub move_interval_ms: u64,
    pub steps: u32,
    pub is_over: bool,
    pub is_paused: bool,
}

impl GameState {
    /// Create a new game state heading right
    pub fn new(
        snake: Snake,
        food: Option<Position>,
        grid_size: usize,
        move_interval_ms: u64,
    ) -> Self {
        Self {
            snake,
            food,
            direction: Direction::Right,
            input: InputQueue::new(),
            grid_size,
            score: 0,
            move_interval_ms,
            steps: 0,
            is_over: false,
            is_paused: false,
        }
    }

    /// Queue a turn for a later tick. Returns whether it was admitted.
    pub fn offer_direction(&mut self, direction: Direction) -> bool {
        self.input.offer(direction, self.direction)
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.grid_size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }
}
