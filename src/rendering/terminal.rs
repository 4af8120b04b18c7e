use super::Screen;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::Print,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::{self, Stdout, Write};

/// Crossterm-backed screen. Cell writes queue on stdout and become
/// visible at the next `flush`.
pub struct TerminalScreen {
    out: Stdout,
    released: bool,
}

impl TerminalScreen {
    /// Take over the terminal: raw mode, alternate screen, hidden
    /// cursor, cleared display. On failure the terminal is left as it
    /// was found.
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All)) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        Ok(Self {
            out,
            released: false,
        })
    }
}

impl Screen for TerminalScreen {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))
    }

    fn set_cell(&mut self, x: u16, y: u16, glyph: char) -> io::Result<()> {
        queue!(self.out, MoveTo(x, y), Print(glyph))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Restore the terminal. Only the first call does anything.
    fn release(&mut self) -> io::Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        execute!(self.out, Show, LeaveAlternateScreen)?;
        disable_raw_mode()
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        let _ = self.release();
    }
}
