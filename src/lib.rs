pub mod board;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod leaderboard;
pub mod logging;
pub mod round;
pub mod snake;
pub mod term;

pub use board::Board;
pub use error::GameError;
pub use snake::{Direction, Position, Snake};
