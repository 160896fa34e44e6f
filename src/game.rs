use std::io;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::Board;
use crate::config::{GameConfig, INFORMATION_HEIGHT, INSTRUCTION_WIDTH};
use crate::error::Result;
use crate::food::FoodSpawner;
use crate::input::{Intent, MenuKey, latest_intent, menu_key};
use crate::leaderboard::Leaderboard;
use crate::round::{Frame, Presenter, Round, RoundEnd};
use crate::term::{Coords, Rect, TermInt, TermManager};

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';

const MENU_ITEMS: [&str; 2] = ["Restart", "Quit"];
const MENU_OFFSET: TermInt = 4;

/// Everything a session shows besides the running round.
pub trait Screen: Presenter {
    fn begin_round(&mut self, leaderboard: &Leaderboard) -> io::Result<()>;
    /// Shows the final score and asks for another round.
    fn game_over(&mut self, final_score: u32) -> io::Result<bool>;
}

/// Repeats rounds until the player quits, keeping the leaderboard file up
/// to date in between.
pub struct SnakeGame<S> {
    config: GameConfig,
    screen: S,
    spawner: FoodSpawner<StdRng>,
}

impl<S: Screen> SnakeGame<S> {
    pub fn new(config: GameConfig, screen: S) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        log::info!(
            "session on a {}x{} board, seed {:?}",
            config.board.width, config.board.height, config.seed
        );
        SnakeGame { config, screen, spawner: FoodSpawner::new(rng) }
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn start(&mut self) -> Result<()> {
        loop {
            let mut leaderboard = Leaderboard::load(&self.config.record_file, self.config.leaders);
            self.screen.begin_round(&leaderboard)?;

            let end = {
                let mut round = Round::start(self.config.round_settings(), &mut self.spawner)?;
                log::info!("round started");
                round.run(&mut self.screen)?
            };

            let final_score = match end {
                RoundEnd::Crashed { final_score } | RoundEnd::BoardFull { final_score } => final_score,
                RoundEnd::Aborted => {
                    log::info!("round aborted, score not recorded");
                    return Ok(());
                }
            };
            log::info!("round over, score {}", final_score);

            self.record(&mut leaderboard, final_score);

            if !self.screen.game_over(final_score)? {
                return Ok(());
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn record(&self, leaderboard: &mut Leaderboard, score: u32) {
        if !leaderboard.merge(score) {
            return;
        }
        // A failed write loses this score, the game itself carries on
        if let Err(err) = leaderboard.save(&self.config.record_file) {
            log::error!("{}", err);
        }
    }
}

/// Information panel on top, board below it, instructions on the right.
pub struct TerminalScreen {
    term: TermManager,
    info: Rect,
    game: Rect,
    side: Rect,
}

impl TerminalScreen {
    pub fn new(term: TermManager, board: Board) -> Self {
        let (columns, _) = term.get_terminal_size();
        let (width, height) = (board.width as TermInt, board.height as TermInt);

        TerminalScreen {
            term,
            info: Rect::new(0, 0, columns, INFORMATION_HEIGHT),
            game: Rect::new(0, INFORMATION_HEIGHT, width, height),
            side: Rect::new(width, INFORMATION_HEIGHT, INSTRUCTION_WIDTH, height),
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn in_side(&self, (x, y): Coords) -> Coords {
        (self.side.x + x, self.side.y + y)
    }

    fn draw_information(&mut self) -> io::Result<()> {
        let lines = [
            "Welcome to The Snake Game!",
            "Eat the food, avoid the walls and your own tail.",
            "Every 5 points the snake gets faster.",
            "Ctrl+C quits at any time.",
        ];
        for (i, line) in lines.iter().enumerate() {
            let room = self.info.width.saturating_sub(2) as usize;
            let line: String = line.chars().take(room).collect();
            self.term.print_str_at((1, 1 + i as TermInt), &line)?;
        }
        Ok(())
    }

    fn draw_instructions(&mut self) -> io::Result<()> {
        let lines = [
            (1, "Manual"),
            (3, "Up: W"),
            (4, "Down: S"),
            (5, "Left: A"),
            (6, "Right: D"),
            (8, "Difficulty"),
            (11, "Points"),
        ];
        for (row, text) in lines {
            let pos = self.in_side((1, row));
            self.term.print_str_at(pos, text)?;
        }
        Ok(())
    }

    fn draw_leaderboard(&mut self, leaderboard: &Leaderboard) -> io::Result<()> {
        // header on row 14, ranks below it, bottom border last
        let room = (self.side.height as usize).saturating_sub(16);
        if room == 0 {
            return Ok(());
        }

        let pos = self.in_side((1, 14));
        self.term.print_str_at(pos, "Leader Board")?;
        for (i, score) in leaderboard.ranks().iter().take(room).enumerate() {
            let pos = self.in_side((1, 15 + i as TermInt));
            self.term.print_str_at(pos, &format!("#{}: {}", i + 1, score))?;
        }
        Ok(())
    }

    fn draw_stat(&mut self, row: TermInt, value: u32) -> io::Result<()> {
        let pos = self.in_side((1, row));
        let width = INSTRUCTION_WIDTH.saturating_sub(2) as usize;
        self.term.print_str_at(pos, &format!("{:<width$}", value, width = width))
    }

    fn draw_menu_items(&mut self, menu: Rect, selected: usize) -> io::Result<()> {
        for (i, item) in MENU_ITEMS.iter().enumerate() {
            let pos = (menu.x + 1, menu.y + MENU_OFFSET + i as TermInt);
            if i == selected {
                self.term.print_reversed_at(pos, item)?;
            } else {
                self.term.print_str_at(pos, item)?;
            }
        }
        self.term.flush()
    }
}

impl Presenter for TerminalScreen {
    fn poll_intent(&mut self) -> io::Result<Intent> {
        let events = self.term.read_key_events_queue()?;
        Ok(latest_intent(&events))
    }

    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let interior = Rect::new(self.game.x + 1, self.game.y + 1, self.game.width - 2, self.game.height - 2);
        self.term.clear_rect(interior)?;

        let origin = (self.game.x, self.game.y);
        let at = |x: i32, y: i32| (origin.0 + x as TermInt, origin.1 + y as TermInt);

        self.term.print_at(at(frame.food.x, frame.food.y), FOOD_CHAR)?;
        for (i, pos) in frame.body.iter().enumerate() {
            let ch = if i == 0 {frame.head_char} else {SNAKE_BODY_CHAR};
            self.term.print_at(at(pos.x, pos.y), ch)?;
        }

        self.draw_stat(9, frame.difficulty)?;
        self.draw_stat(12, frame.score)?;
        self.term.flush()
    }
}

impl Screen for TerminalScreen {
    fn begin_round(&mut self, leaderboard: &Leaderboard) -> io::Result<()> {
        self.term.clear()?;
        for rect in [self.info, self.game, self.side] {
            self.term.draw_box(rect)?;
        }
        self.draw_information()?;
        self.draw_instructions()?;
        self.draw_leaderboard(leaderboard)?;
        self.term.flush()
    }

    fn game_over(&mut self, final_score: u32) -> io::Result<bool> {
        let menu = menu_rect(self.game, self.side);
        self.term.clear_rect(menu)?;
        self.term.draw_box(menu)?;
        self.term.print_str_at((menu.x + 1, menu.y + 1), "Your Final Score:")?;
        self.term.print_str_at((menu.x + 1, menu.y + 2), &final_score.to_string())?;

        let mut selected = 0;
        self.draw_menu_items(menu, selected)?;

        loop {
            match menu_key(&self.term.read_key_blocking()?) {
                MenuKey::Previous => selected = (selected + MENU_ITEMS.len() - 1) % MENU_ITEMS.len(),
                MenuKey::Next => selected = (selected + 1) % MENU_ITEMS.len(),
                MenuKey::Select => return Ok(selected == 0),
                MenuKey::Quit => return Ok(false),
                MenuKey::Other => continue,
            }
            self.draw_menu_items(menu, selected)?;
        }
    }
}

/// Centered over the board, large enough for score and items, and never
/// below the board's last row. Grows upwards over the information panel on
/// boards too short to hold it.
fn menu_rect(game: Rect, side: Rect) -> Rect {
    let bottom = game.y + game.height;
    let width = (game.width / 2).max(20).min(game.width + side.width);
    let height = (game.height / 2).max(MENU_OFFSET + 3).min(bottom);
    let x = game.width.saturating_sub(width) / 2;
    let y = (game.y + game.height.saturating_sub(height) / 2).min(bottom - height);
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panels(width: TermInt, height: TermInt) -> (Rect, Rect) {
        (
            Rect::new(0, INFORMATION_HEIGHT, width, height),
            Rect::new(width, INFORMATION_HEIGHT, INSTRUCTION_WIDTH, height),
        )
    }

    #[test]
    fn menu_sits_inside_a_roomy_board() {
        let (game, side) = panels(62, 18);
        let menu = menu_rect(game, side);
        assert_eq!(menu, Rect::new(15, INFORMATION_HEIGHT + 4, 31, 9));
    }

    #[test]
    fn menu_never_runs_past_the_last_row() {
        for height in 3..12 {
            let (game, side) = panels(3, height);
            let menu = menu_rect(game, side);
            assert!(menu.y + menu.height <= game.y + game.height, "board height {}", height);
            assert!(menu.height >= MENU_OFFSET + 3);
            assert!(menu.x + menu.width <= game.width + side.width);
        }
    }
}
