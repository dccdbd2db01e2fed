use std::collections::VecDeque;

use Direction::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Stop,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
            Stop => Stop,
        }
    }

    /// Unit step (dx, dy); y grows downwards.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
            Stop => (0, 0),
        }
    }
}

/// Direction changes the player asked for but that haven't been applied yet.
/// At most one is consumed per tick.
#[derive(Debug, Default)]
pub struct DirectionQueue {
    pending: VecDeque<Direction>,
}

impl DirectionQueue {
    pub fn new() -> Self {
        DirectionQueue { pending: VecDeque::new() }
    }

    /// Queues `direction` unless it repeats or reverses the pending tail.
    /// `Stop` is never queued. Returns whether it was accepted.
    pub fn push(&mut self, direction: Direction, last_applied: Direction) -> bool {
        let tail = self.pending.back().copied().unwrap_or(last_applied);

        if direction == Stop || direction == tail || direction == tail.opposite() {
            return false;
        }

        self.pending.push_back(direction);
        true
    }

    pub fn pop_next(&mut self, last_applied: Direction) -> Direction {
        self.pending.pop_front().unwrap_or(last_applied)
    }

    pub fn peek_effective(&self, last_applied: Direction) -> Direction {
        self.pending.front().copied().unwrap_or(last_applied)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
