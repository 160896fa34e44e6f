use std::collections::VecDeque;

use crate::board::Board;
use Direction::*;

/// A grid cell. Interior cells are 1-indexed, 0 is the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }

    fn is_adjacent(self, other: Position) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Up | Down)
    }

    pub fn is_orthogonal_to(self, other: Direction) -> bool {
        self.is_vertical() != other.is_vertical()
    }
}

/// Heading after a steering request: only a turn onto the other axis is
/// accepted, same-axis requests (reversal included) keep the current heading.
pub fn next_heading(current: Direction, requested: Direction) -> Direction {
    if requested.is_orthogonal_to(current) {
        requested
    } else {
        current
    }
}

pub struct Snake {
    board: Board,
    /// Head first, tail last.
    body: VecDeque<Position>,
    heading: Direction,
    food: Option<Position>,
}

impl Snake {
    /// A vertical snake with its head on the board center, tail extending
    /// downwards, heading up.
    pub fn new(board: Board, length: usize) -> Self {
        let center = board.center();
        let body = (0..length.max(1) as i32)
            .map(|i| Position::new(center.x, center.y + i))
            .collect();
        Snake { board, body, heading: Up, food: None }
    }

    /// Builds a snake from explicit segments, head first. Returns `None` when
    /// the segments are empty or not chained cell to cell.
    pub fn from_segments(board: Board, segments: &[Position], heading: Direction) -> Option<Self> {
        if segments.is_empty() || segments.windows(2).any(|w| !w[0].is_adjacent(w[1])) {
            return None;
        }
        let body = segments.iter().copied().collect();
        Some(Snake { board, body, heading, food: None })
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Position {
        // body is never empty: both constructors guarantee one segment and
        // advance() pushes before it pops
        self.body[0]
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn change_heading(&mut self, requested: Direction) {
        self.heading = next_heading(self.heading, requested);
    }

    pub fn peek_next_head(&self) -> Position {
        self.head().step(self.heading)
    }

    /// Moves one cell along the heading. Returns whether the new head landed
    /// on the sensed food, in which case the tail stays and the snake grows.
    ///
    /// No collision checks happen here, callers test `collides()` first.
    pub fn advance(&mut self) -> bool {
        let new_head = self.peek_next_head();
        self.body.push_front(new_head);

        if self.food == Some(new_head) {
            true
        } else {
            self.body.pop_back();
            false
        }
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn hits_wall(&self) -> bool {
        !self.board.is_interior(self.peek_next_head())
    }

    pub fn hits_self(&self) -> bool {
        self.is_occupied(self.peek_next_head())
    }

    pub fn collides(&self) -> bool {
        self.hits_wall() || self.hits_self()
    }

    pub fn sense_food(&mut self, food: Position) {
        self.food = Some(food);
    }

    pub fn head_char(&self) -> char {
        match self.heading {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}
