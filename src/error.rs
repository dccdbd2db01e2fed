use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("position ({x}, {y}) is outside the board")]
    OutOfBounds { x: i32, y: i32 },

    #[error("maze index {0} is not in the catalog")]
    InvalidMazeIndex(usize),

    #[error("no free cell left to place food")]
    NoFreeCell,
}
