//! One play session: steering, movement, food and the speed curve.

use std::collections::VecDeque;
use std::io;
use std::thread::sleep;
use std::time::Duration;

use rand::Rng;

use crate::board::Board;
use crate::food::{FoodSpawner, SpawnError};
use crate::input::Intent;
use crate::snake::{Direction, Position, Snake};

/// Points between two speed-ups.
pub const POINTS_PER_LEVEL: u32 = 5;
/// Tick delay multiplier applied per level.
pub const SPEED_UP: f64 = 0.75;

pub fn difficulty_for(score: u32) -> u32 {
    score / POINTS_PER_LEVEL
}

/// `base * 0.75^difficulty`, rounded to the microsecond.
pub fn delay_for(base: Duration, difficulty: u32) -> Duration {
    let factor = SPEED_UP.powi(difficulty.min(i32::MAX as u32) as i32);
    Duration::from_micros((base.as_micros() as f64 * factor).round() as u64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSettings {
    pub board: Board,
    pub initial_length: usize,
    pub base_delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Moved { ate_food: bool },
    Ended { final_score: u32 },
}

/// How `Round::run` finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    /// The snake ran into a wall or itself.
    Crashed { final_score: u32 },
    /// Food could not be placed anymore.
    BoardFull { final_score: u32 },
    /// The player quit mid-round; the score is not recorded.
    Aborted,
}

/// Snapshot handed to the presenter once per tick.
pub struct Frame<'a> {
    pub body: &'a VecDeque<Position>,
    pub head_char: char,
    pub food: Position,
    pub score: u32,
    pub difficulty: u32,
}

/// Display and input side of a round.
pub trait Presenter {
    /// Non-blocking; `Intent::Idle` when nothing was pressed.
    fn poll_intent(&mut self) -> io::Result<Intent>;
    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()>;
}

pub struct Round<'a, R> {
    settings: RoundSettings,
    spawner: &'a mut FoodSpawner<R>,
    snake: Snake,
    food: Position,
    score: u32,
    difficulty: u32,
    delay: Duration,
    phase: Phase,
}

impl<'a, R: Rng> Round<'a, R> {
    /// Fresh snake on the board center, score and difficulty at zero and the
    /// first food placed. The round is `Running` once this returns.
    pub fn start(settings: RoundSettings, spawner: &'a mut FoodSpawner<R>) -> Result<Self, SpawnError> {
        let mut snake = Snake::new(settings.board, settings.initial_length);
        let food = spawner.spawn(&settings.board, &mut snake)?;

        Ok(Round {
            settings,
            spawner,
            snake,
            food,
            score: 0,
            difficulty: 0,
            delay: settings.base_delay,
            phase: Phase::Running,
        })
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            body: self.snake.body(),
            head_char: self.snake.head_char(),
            food: self.food,
            score: self.score,
            difficulty: self.difficulty,
        }
    }

    /// One simulation step. The move is checked before it is committed, so a
    /// crashed snake is never left with its head inside a wall or its body.
    pub fn tick(&mut self, intent: Option<Direction>) -> Result<TickOutcome, SpawnError> {
        if self.phase == Phase::Ended {
            return Ok(TickOutcome::Ended { final_score: self.score });
        }

        if let Some(dir) = intent {
            self.snake.change_heading(dir);
        }

        if self.snake.collides() {
            self.phase = Phase::Ended;
            return Ok(TickOutcome::Ended { final_score: self.score });
        }

        let ate_food = self.snake.advance();
        if ate_food {
            self.score += 1;
            self.adjust_delay();
            match self.spawner.spawn(&self.settings.board, &mut self.snake) {
                Ok(food) => self.food = food,
                Err(err) => {
                    self.phase = Phase::Ended;
                    return Err(err);
                }
            }
        }

        Ok(TickOutcome::Moved { ate_food })
    }

    /// Drives ticks until the round ends. Every tick, the first one included,
    /// is preceded by one current delay.
    pub fn run<P: Presenter>(&mut self, presenter: &mut P) -> io::Result<RoundEnd> {
        presenter.draw(&self.frame())?;

        loop {
            sleep(self.delay);

            let intent = match presenter.poll_intent()? {
                Intent::Quit => {
                    self.phase = Phase::Ended;
                    return Ok(RoundEnd::Aborted);
                }
                Intent::Steer(dir) => Some(dir),
                Intent::Idle => None,
            };

            match self.tick(intent) {
                Ok(TickOutcome::Moved { .. }) => {}
                Ok(TickOutcome::Ended { final_score }) => return Ok(RoundEnd::Crashed { final_score }),
                Err(err) => {
                    log::warn!("round stopped at score {}: {}", self.score, err);
                    return Ok(RoundEnd::BoardFull { final_score: self.score });
                }
            }

            presenter.draw(&self.frame())?;
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    // The delay only ratchets on a level boundary.
    fn adjust_delay(&mut self) {
        self.difficulty = difficulty_for(self.score);
        if self.score % POINTS_PER_LEVEL == 0 {
            self.delay = delay_for(self.settings.base_delay, self.difficulty);
        }
    }
}
