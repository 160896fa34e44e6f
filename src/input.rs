use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction;

/// What the player asked for during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Steer(Direction),
    Idle,
    Quit,
}

/// Keys understood by the restart menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Previous,
    Next,
    Select,
    Quit,
    Other,
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

pub fn intent_for(ev: &KeyEvent) -> Intent {
    if is_ctrl_c(ev) {
        return Intent::Quit;
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Intent::Steer(Direction::Up),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Intent::Steer(Direction::Left),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Intent::Steer(Direction::Down),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Intent::Steer(Direction::Right),
        _ => Intent::Idle,
    }
}

/// Folds everything pressed since the last tick into one intent: a quit
/// wins, otherwise the most recent steering key counts.
pub fn latest_intent<'a>(events: impl IntoIterator<Item = &'a KeyEvent>) -> Intent {
    let mut latest = Intent::Idle;
    for ev in events {
        match intent_for(ev) {
            Intent::Quit => return Intent::Quit,
            Intent::Idle => {}
            steer => latest = steer,
        }
    }
    latest
}

pub fn menu_key(ev: &KeyEvent) -> MenuKey {
    if is_ctrl_c(ev) {
        return MenuKey::Quit;
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => MenuKey::Previous,
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => MenuKey::Next,
        KeyCode::Char(' ') | KeyCode::Enter => MenuKey::Select,
        _ => MenuKey::Other,
    }
}
