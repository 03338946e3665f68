//! Bounded buffer of pending turns
//!
//! Key presses can arrive faster than the snake moves. Queuing up to two
//! turns lets a quick "up, left" land on consecutive ticks instead of the
//! second press overwriting the first.

use std::collections::VecDeque;

use super::direction::Direction;

/// Maximum number of turns waiting for a tick
pub const INPUT_QUEUE_CAPACITY: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputQueue {
    pending: VecDeque<Direction>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(INPUT_QUEUE_CAPACITY),
        }
    }

    /// Queue a turn, given the direction the snake currently travels in.
    ///
    /// The turn is dropped when the queue is full or when it reverses the
    /// direction it would follow: the last queued turn, or `current` if none
    /// is queued. Returns whether the turn was admitted.
    pub fn offer(&mut self, direction: Direction, current: Direction) -> bool {
        if self.pending.len() >= INPUT_QUEUE_CAPACITY {
            return false;
        }

        let follows = self.pending.back().copied().unwrap_or(current);
        if follows.is_opposite(direction) {
            return false;
        }

        self.pending.push_back(direction);
        true
    }

    /// Take the oldest queued turn
    pub fn consume(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_and_consume_in_order() {
        let mut queue = InputQueue::new();
        assert!(queue.offer(Direction::Up, Direction::Right));
        assert!(queue.offer(Direction::Left, Direction::Right));

        assert_eq!(queue.consume(), Some(Direction::Up));
        assert_eq!(queue.consume(), Some(Direction::Left));
        assert_eq!(queue.consume(), None);
    }

    #[test]
    fn test_rejects_reverse_of_current() {
        let mut queue = InputQueue::new();
        assert!(!queue.offer(Direction::Left, Direction::Right));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_rejects_reverse_of_last_queued() {
        let mut queue = InputQueue::new();
        assert!(queue.offer(Direction::Up, Direction::Right));
        // Down would follow Up, so it is a reversal even though current is Right
        assert!(!queue.offer(Direction::Down, Direction::Right));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_allows_reverse_of_current_after_a_turn() {
        let mut queue = InputQueue::new();
        assert!(queue.offer(Direction::Up, Direction::Right));
        assert!(queue.offer(Direction::Left, Direction::Right));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_drops_when_full() {
        let mut queue = InputQueue::new();
        assert!(queue.offer(Direction::Up, Direction::Right));
        assert!(queue.offer(Direction::Right, Direction::Right));
        assert!(!queue.offer(Direction::Down, Direction::Right));
        assert_eq!(queue.len(), INPUT_QUEUE_CAPACITY);
    }

    #[test]
    fn test_never_admits_immediate_reversal() {
        let all = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];

        for current in all {
            for first in all {
                for second in all {
                    let mut queue = InputQueue::new();
                    queue.offer(first, current);
                    let follows = queue.pending.back().copied().unwrap_or(current);
                    let admitted = queue.offer(second, current);
                    if follows.is_opposite(second) {
                        assert!(!admitted, "{current:?} {first:?} {second:?}");
                    }
                }
            }
        }
    }
}
