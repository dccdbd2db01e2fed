use std::collections::HashSet;

use crate::board::{all_positions, Color, Position, BLACK, HEIGHT, WALL_COLOUR};
use crate::error::GameError;

type Rows = [&'static str; HEIGHT as usize];

const NONE: Rows = [
    "........",
    "........",
    "........",
    "........",
    "........",
    "........",
    "........",
    "........",
];

const CORNER: Rows = [
    "##....##",
    "#......#",
    "........",
    "........",
    "........",
    "........",
    "#......#",
    "##....##",
];

const THING: Rows = [
    "........",
    ".##..##.",
    ".#....#.",
    "........",
    "........",
    ".#....#.",
    ".##..##.",
    "........",
];

pub struct Maze {
    name: &'static str,
    frame: Vec<Color>,
    obstacles: HashSet<Position>,
}

impl Maze {
    /// Builds a maze from ASCII rows, `#` marking an obstacle.
    fn from_rows(name: &'static str, rows: &Rows) -> Self {
        let frame: Vec<Color> = all_positions()
            .map(|p| match rows[p.y as usize].as_bytes().get(p.x as usize) {
                Some(b'#') => WALL_COLOUR,
                _ => BLACK,
            })
            .collect();

        let obstacles = all_positions()
            .zip(frame.iter())
            .filter(|(_, colour)| **colour != BLACK)
            .map(|(pos, _)| pos)
            .collect();

        Maze { name, frame, obstacles }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn frame(&self) -> &[Color] {
        &self.frame
    }

    pub fn obstacles(&self) -> &HashSet<Position> {
        &self.obstacles
    }
}

/// The fixed set of mazes plus which one is in play.
pub struct MazeCatalog {
    mazes: Vec<Maze>,
    active: usize,
}

impl MazeCatalog {
    pub fn new() -> Self {
        let mazes = vec![
            Maze::from_rows("none", &NONE),
            Maze::from_rows("corner", &CORNER),
            Maze::from_rows("thing", &THING),
        ];

        MazeCatalog { mazes, active: 0 }
    }

    #[cfg(test)]
    pub fn catalog(&self) -> &[Maze] {
        &self.mazes
    }

    pub fn len(&self) -> usize {
        self.mazes.len()
    }

    pub fn get(&self, index: usize) -> Result<&Maze, GameError> {
        self.mazes.get(index).ok_or(GameError::InvalidMazeIndex(index))
    }

    /// Any index is accepted; it wraps around the catalog.
    pub fn select(&mut self, index: usize) -> &Maze {
        self.active = index % self.mazes.len();
        &self.mazes[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &Maze {
        &self.mazes[self.active]
    }

    pub fn active_obstacles(&self) -> &HashSet<Position> {
        self.active().obstacles()
    }

    pub fn active_frame(&self) -> &[Color] {
        self.active().frame()
    }
}
