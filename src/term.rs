use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{Event, KeyEvent, KeyEventKind, poll, read};
use crossterm::style::Attribute;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

/// Raw-mode alternate screen. Restored on drop if still active.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    active: bool,
}

/// Screen rectangle, top left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: TermInt,
    pub y: TermInt,
    pub width: TermInt,
    pub height: TermInt,
}

impl Rect {
    pub fn new(x: TermInt, y: TermInt, width: TermInt, height: TermInt) -> Self {
        Rect { x, y, width, height }
    }
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager { width, height, stdout: stdout(), active: false })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn read_key_blocking(&self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind != KeyEventKind::Release {
                    return Ok(ev);
                }
            }
        }
    }

    /// Drains pending key presses without waiting for new ones.
    pub fn read_key_events_queue(&self) -> io::Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                if ev.kind != KeyEventKind::Release {
                    events.push(ev);
                }
            }
        }

        Ok(events)
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    pub fn draw_box(&mut self, rect: Rect) -> io::Result<()> {
        if rect.width < 2 || rect.height < 2 {
            return Ok(());
        }

        let end_x = rect.x + rect.width - 1;
        let end_y = rect.y + rect.height - 1;

        for x in rect.x..=end_x {
            let ch = if x == rect.x || x == end_x {'+'} else {'-'};
            self.print_at((x, rect.y), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in rect.y + 1..end_y {
            self.print_at((rect.x, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        Ok(())
    }

    /// Blanks everything inside the rectangle.
    pub fn clear_rect(&mut self, rect: Rect) -> io::Result<()> {
        let blank = " ".repeat(rect.width as usize);
        for y in rect.y..rect.y + rect.height {
            queue!(self.stdout, cursor::MoveTo(rect.x, y), style::Print(&blank))?;
        }
        Ok(())
    }

    pub fn print_at(&mut self, pos: Coords, ch: char) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }

    pub fn print_str_at(&mut self, pos: Coords, text: &str) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(text))
    }

    pub fn print_reversed_at(&mut self, pos: Coords, text: &str) -> io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            style::SetAttribute(Attribute::Reverse),
            style::Print(text),
            style::SetAttribute(Attribute::Reset)
        )
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
