use rand::seq::IteratorRandom;
use rand::Rng;
use thiserror::Error;

use crate::board::Board;
use crate::snake::{Position, Snake};

/// Random samples tried before falling back to scanning the free cells.
pub const MAX_SAMPLES: usize = 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpawnError {
    #[error("no free interior cell left for food")]
    BoardFull,
}

/// Places food on free interior cells using an injected RNG.
pub struct FoodSpawner<R> {
    rng: R,
}

impl<R: Rng> FoodSpawner<R> {
    pub fn new(rng: R) -> Self {
        FoodSpawner { rng }
    }

    /// Picks a uniformly random interior cell the snake does not cover and
    /// makes the snake aware of it.
    pub fn spawn(&mut self, board: &Board, snake: &mut Snake) -> Result<Position, SpawnError> {
        let food = self.pick(board, snake)?;
        snake.sense_food(food);
        log::debug!("food spawned at ({}, {})", food.x, food.y);
        Ok(food)
    }

    fn pick(&mut self, board: &Board, snake: &Snake) -> Result<Position, SpawnError> {
        if board.interior_area() == 0 {
            return Err(SpawnError::BoardFull);
        }

        for _ in 0..MAX_SAMPLES {
            let pos = Position::new(
                self.rng.gen_range(1..board.width - 1),
                self.rng.gen_range(1..board.height - 1),
            );
            if !snake.is_occupied(pos) {
                return Ok(pos);
            }
        }

        // Crowded board: choose among what is left instead of sampling blind
        board
            .interior_cells()
            .filter(|pos| !snake.is_occupied(*pos))
            .choose(&mut self.rng)
            .ok_or(SpawnError::BoardFull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spawner(seed: u64) -> FoodSpawner<StdRng> {
        FoodSpawner::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn food_lands_on_free_interior_and_is_sensed() {
        let board = Board::new(12, 9);
        let mut snake = Snake::new(board, 3);
        let mut spawner = spawner(7);

        for _ in 0..200 {
            let food = spawner.spawn(&board, &mut snake).unwrap();
            assert!(board.is_interior(food));
            assert!(!snake.is_occupied(food));
            assert_eq!(snake.food(), Some(food));
        }
    }

    #[test]
    fn last_free_cell_is_found() {
        // 3x1 interior, snake covers two of the three cells
        let board = Board::new(5, 3);
        let segments = [Position::new(1, 1), Position::new(2, 1)];
        let mut snake = Snake::from_segments(board, &segments, crate::snake::Direction::Left).unwrap();

        let food = spawner(1).spawn(&board, &mut snake).unwrap();
        assert_eq!(food, Position::new(3, 1));
    }

    #[test]
    fn full_board_fails_instead_of_looping() {
        let board = Board::new(4, 3);
        let segments = [Position::new(1, 1), Position::new(2, 1)];
        let mut snake = Snake::from_segments(board, &segments, crate::snake::Direction::Left).unwrap();

        assert_eq!(spawner(3).spawn(&board, &mut snake), Err(SpawnError::BoardFull));
        assert_eq!(snake.food(), None);
    }
}
