use std::collections::HashSet;

use crate::board::{Color, Position, SNAKE_COLOUR};
use crate::direction::Direction;

pub const INITIAL_SIZE: usize = 2;
pub const START_POSITIONS: [Position; INITIAL_SIZE] = [Position::new(4, 4), Position::new(4, 5)];

#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    pub size: usize,
    pub colour: Color,
    /// Head first.
    positions: Vec<Position>,
}

impl Snake {
    pub fn new() -> Self {
        Snake::from_positions(START_POSITIONS.to_vec())
    }

    pub fn from_positions(positions: Vec<Position>) -> Self {
        Snake { size: positions.len(), colour: SNAKE_COLOUR, positions }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn head(&self) -> Position {
        self.positions[0]
    }

    pub fn body(&self) -> &[Position] {
        &self.positions[1..]
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Where the head would land moving in `direction`. The result may be off
    /// the board; bounds are the caller's concern.
    pub fn prospective_move(&self, direction: Direction) -> Position {
        let head = self.head();
        let (dx, dy) = direction.offset();
        Position::new(head.x + dx, head.y + dy)
    }

    /// Pushes `new_head` on the front. Without `grow` the tail is dropped; with
    /// it the caller still has to bump `size`.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.positions.insert(0, new_head);

        if !grow {
            self.positions.pop();
        }
    }

    pub fn collides_with_self(&self, point: Position) -> bool {
        self.body().contains(&point)
    }

    pub fn collides_with_obstacles(&self, point: Position, obstacles: &HashSet<Position>) -> bool {
        obstacles.contains(&point)
    }

    pub fn occupies(&self, point: Position) -> bool {
        self.positions.contains(&point)
    }
}
