mod terminal;

pub use terminal::TerminalScreen;

use crate::application::Event;
use std::io;
use std::sync::mpsc::SyncSender;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Glyph for a live cell; cleared positions read as blank.
pub const LIVE_GLYPH: char = 'X';

/// Display refresh cadence, independent of the simulation cadence.
const FLUSH_PERIOD: Duration = Duration::from_micros(1_000_000 / 60);

/// The drawing surface as the coordinator sees it. Cell writes are
/// buffered until `flush`; `release` restores the terminal and must
/// tolerate being called more than once.
pub trait Screen {
    fn size(&self) -> io::Result<(u16, u16)>;
    fn clear(&mut self) -> io::Result<()>;
    fn set_cell(&mut self, x: u16, y: u16, glyph: char) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
    fn release(&mut self) -> io::Result<()>;
}

/// Ask the coordinator to flush at 60 Hz, through the same channel as
/// every other event. The ticker never touches the screen itself, so the
/// coordinator stays the only writer of the terminal.
pub fn spawn_flush_ticker(events: SyncSender<Event>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("render-flush".to_string())
        .spawn(move || {
            let mut deadline = Instant::now() + FLUSH_PERIOD;
            loop {
                thread::sleep(deadline.saturating_duration_since(Instant::now()));
                deadline += FLUSH_PERIOD;
                if events.send(Event::Flush).is_err() {
                    return;
                }
            }
        })
}
