use std::process::exit;

use clap::Parser;

use snake::config::{Args, GameConfig};
use snake::error::Result;
use snake::game::{SnakeGame, TerminalScreen};
use snake::logging::init_logging;
use snake::term::TermManager;

fn main() {
    let args = Args::parse();

    // The terminal is restored by the time the game is dropped
    if let Err(err) = run(&args) {
        eprintln!("term-snake: {}", err);
        exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    init_logging(&args.log_file)?;

    let mut term = TermManager::new()?;
    let config = GameConfig::from_args(args, term.get_terminal_size())?;
    let board = config.board;
    term.setup()?;

    let mut game = SnakeGame::new(config, TerminalScreen::new(term, board));
    game.start()
}
