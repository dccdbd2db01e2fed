use crate::error::GameError;

pub const WIDTH: i32 = 8;
pub const HEIGHT: i32 = 8;
pub const CELLS: usize = (WIDTH * HEIGHT) as usize;

pub type Color = [u8; 3];

pub const BLACK: Color = [0, 0, 0];
pub const RED: Color = [255, 0, 0];
pub const SNAKE_COLOUR: Color = [0, 255, 0];
pub const HEAD_COLOUR: Color = [137, 172, 163];
pub const FOOD_COLOUR: Color = [255, 127, 0];
pub const WALL_COLOUR: Color = [40, 60, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn in_bounds(&self) -> bool {
        (0..WIDTH).contains(&self.x) && (0..HEIGHT).contains(&self.y)
    }

    /// Row-major index into a frame, `x + WIDTH * y`.
    pub fn index(&self) -> Result<usize, GameError> {
        if !self.in_bounds() {
            return Err(GameError::OutOfBounds { x: self.x, y: self.y });
        }

        Ok((self.x + WIDTH * self.y) as usize)
    }

    pub fn from_index(idx: usize) -> Self {
        let idx = idx as i32;
        Position::new(idx % WIDTH, idx / WIDTH)
    }
}

/// Every cell of the board, row by row.
pub fn all_positions() -> impl Iterator<Item = Position> {
    (0..CELLS).map(Position::from_index)
}

/// The in-memory frame that gets composited each tick and then handed to the
/// display in one go.
pub struct Board {
    pixels: Vec<Color>,
}

impl Board {
    pub fn new() -> Self {
        Board { pixels: vec![BLACK; CELLS] }
    }

    /// Resets the buffer to `base`, normally the active maze layout.
    pub fn clear(&mut self, base: &[Color]) {
        debug_assert_eq!(base.len(), CELLS);
        self.pixels.clear();
        self.pixels.extend_from_slice(base);
    }

    pub fn set_pixel(&mut self, pos: Position, colour: Color) -> Result<(), GameError> {
        let idx = pos.index()?;
        self.pixels[idx] = colour;
        Ok(())
    }

    #[cfg(test)]
    pub fn pixel(&self, pos: Position) -> Result<Color, GameError> {
        Ok(self.pixels[pos.index()?])
    }

    pub fn frame(&self) -> &[Color] {
        &self.pixels
    }
}

/// The red cross shown when the snake dies.
pub fn cross_frame() -> Vec<Color> {
    all_positions()
        .map(|p| if p.x == p.y || p.x == WIDTH - 1 - p.y { RED } else { BLACK })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_pixel_in_bounds() {
        let mut board = Board::new();

        for pos in all_positions() {
            board.set_pixel(pos, FOOD_COLOUR).unwrap();
            assert_eq!(board.pixel(pos).unwrap(), FOOD_COLOUR);
        }
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut board = Board::new();

        for (x, y) in [(-1, 0), (0, -1), (WIDTH, 0), (0, HEIGHT), (9, 9)].iter() {
            let res = board.set_pixel(Position::new(*x, *y), RED);
            assert_eq!(res, Err(GameError::OutOfBounds { x: *x, y: *y }));
        }

        assert!(board.frame().iter().all(|c| *c == BLACK));
    }

    #[test]
    fn test_frame_is_row_major() {
        let mut board = Board::new();
        board.set_pixel(Position::new(3, 2), RED).unwrap();

        assert_eq!(board.frame().len(), CELLS);
        assert_eq!(board.frame()[3 + 8 * 2], RED);
        assert_eq!(Position::from_index(19), Position::new(3, 2));
    }

    #[test]
    fn test_clear_restores_base() {
        let mut board = Board::new();
        let mut base = vec![BLACK; CELLS];
        base[0] = WALL_COLOUR;

        board.set_pixel(Position::new(5, 5), RED).unwrap();
        board.clear(&base);

        assert_eq!(board.frame(), &base[..]);
    }

    #[test]
    fn test_cross_frame() {
        let cross = cross_frame();

        assert_eq!(cross[0], RED);
        assert_eq!(cross[7], RED);
        assert_eq!(cross[3 + 8 * 3], RED);
        assert_eq!(cross[4 + 8 * 3], RED);
        assert_eq!(cross[1], BLACK);
        assert_eq!(cross.iter().filter(|c| **c == RED).count(), 16);
    }
}
