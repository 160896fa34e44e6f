use crate::snake::Position;

/// Size of the playing field, wall border included.
///
/// Row/column 0 and `dimension - 1` are wall; everything in between is an
/// interior cell the snake and food may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        Board { width, height }
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn is_interior(&self, pos: Position) -> bool {
        pos.x >= 1 && pos.y >= 1 && pos.x <= self.width - 2 && pos.y <= self.height - 2
    }

    pub fn interior_cells(&self) -> impl Iterator<Item = Position> {
        let (w, h) = (self.width, self.height);
        (1..h - 1).flat_map(move |y| (1..w - 1).map(move |x| Position::new(x, y)))
    }

    pub fn interior_area(&self) -> usize {
        let w = (self.width - 2).max(0) as usize;
        let h = (self.height - 2).max(0) as usize;
        w * h
    }
}
