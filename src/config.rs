use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::board::Board;
use crate::round::RoundSettings;

/// Rows taken by the information panel above the board.
pub const INFORMATION_HEIGHT: u16 = 6;
/// Columns taken by the instruction panel right of the board.
pub const INSTRUCTION_WIDTH: u16 = 18;

#[derive(Debug, Parser)]
#[command(name = "term-snake", about = "Snake in the terminal", version)]
pub struct Args {
    /// Segments the snake starts with
    #[arg(long, default_value_t = 2)]
    pub initial_length: usize,

    /// Tick delay before any speed-up, in milliseconds
    #[arg(long, default_value_t = 100)]
    pub base_delay_ms: u64,

    /// Number of leaderboard ranks
    #[arg(long, default_value_t = 3)]
    pub leaders: usize,

    /// Leaderboard file
    #[arg(long, default_value = "record.dat")]
    pub record_file: PathBuf,

    /// Seed for food placement, random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where log output goes, the terminal is taken by the game
    #[arg(long, default_value = "snake.log")]
    pub log_file: PathBuf,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("initial snake length must be at least 1")]
    ZeroLength,
    #[error("leaderboard needs at least one rank")]
    NoRanks,
    #[error("terminal of {columns}x{rows} is too small for the panels")]
    TerminalTooSmall { columns: u16, rows: u16 },
    #[error("board {width}x{height} cannot fit a snake of length {length}")]
    BoardTooSmall { width: i32, height: i32, length: usize },
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub board: Board,
    pub initial_length: usize,
    pub base_delay: Duration,
    pub leaders: usize,
    pub record_file: PathBuf,
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Sizes the board to the terminal minus the side and top panels.
    pub fn from_args(args: &Args, (columns, rows): (u16, u16)) -> Result<Self, ConfigError> {
        if columns <= INSTRUCTION_WIDTH || rows <= INFORMATION_HEIGHT {
            return Err(ConfigError::TerminalTooSmall { columns, rows });
        }

        let board = Board::new((columns - INSTRUCTION_WIDTH) as i32, (rows - INFORMATION_HEIGHT) as i32);
        let config = GameConfig {
            board,
            initial_length: args.initial_length,
            base_delay: Duration::from_millis(args.base_delay_ms),
            leaders: args.leaders,
            record_file: args.record_file.clone(),
            seed: args.seed,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        if self.leaders == 0 {
            return Err(ConfigError::NoRanks);
        }

        // The snake hangs down from the center and food needs one free cell
        let Board { width, height } = self.board;
        let center = self.board.center();
        let tail_y = center.y as i64 + self.initial_length as i64 - 1;
        let fits = width >= 3 && height >= 3 && tail_y <= (height - 2) as i64;
        if !fits || self.board.interior_area() <= self.initial_length {
            return Err(ConfigError::BoardTooSmall { width, height, length: self.initial_length });
        }

        Ok(())
    }

    pub fn round_settings(&self) -> RoundSettings {
        RoundSettings {
            board: self.board,
            initial_length: self.initial_length,
            base_delay: self.base_delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        Args::parse_from(std::iter::once("term-snake").chain(extra.iter().copied()))
    }

    #[test]
    fn defaults() {
        let args = args(&[]);
        assert_eq!(args.initial_length, 2);
        assert_eq!(args.base_delay_ms, 100);
        assert_eq!(args.leaders, 3);
        assert_eq!(args.record_file, PathBuf::from("record.dat"));
        assert_eq!(args.seed, None);
    }

    #[test]
    fn board_is_terminal_minus_panels() {
        let config = GameConfig::from_args(&args(&["--seed", "9"]), (80, 24)).unwrap();
        assert_eq!(config.board, Board::new(62, 18));
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.round_settings().base_delay, Duration::from_millis(100));
    }

    #[test]
    fn rejects_tiny_terminals_and_boards() {
        assert_eq!(
            GameConfig::from_args(&args(&[]), (18, 30)).unwrap_err(),
            ConfigError::TerminalTooSmall { columns: 18, rows: 30 }
        );
        // 22x6 board: center row 3, interior rows 1..=4
        assert!(GameConfig::from_args(&args(&["--initial-length", "2"]), (40, 12)).is_ok());
        assert_eq!(
            GameConfig::from_args(&args(&["--initial-length", "3"]), (40, 12)).unwrap_err(),
            ConfigError::BoardTooSmall { width: 22, height: 6, length: 3 }
        );
    }

    #[test]
    fn rejects_zero_length_and_ranks() {
        assert_eq!(
            GameConfig::from_args(&args(&["--initial-length", "0"]), (80, 24)).unwrap_err(),
            ConfigError::ZeroLength
        );
        assert_eq!(
            GameConfig::from_args(&args(&["--leaders", "0"]), (80, 24)).unwrap_err(),
            ConfigError::NoRanks
        );
    }
}
