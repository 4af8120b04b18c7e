use crate::domain::Snapshot;
use crate::input;
use crate::rendering::{LIVE_GLYPH, Screen};
use anyhow::{Context, Result};
use crossterm::event::Event as TermEvent;
use std::io;
use std::sync::mpsc::Receiver;
use tracing::{debug, info};

/// Everything the coordinator can be asked to do, as one tagged union so
/// arbitration is a single receive loop.
#[derive(Debug)]
pub enum Event {
    /// A finished generation to paint.
    Draw(Snapshot),
    /// Push buffered cell writes to the display.
    Flush,
    /// Raw terminal input.
    Input(TermEvent),
    /// OS termination signal, by number.
    Signal(i32),
    /// The input backend failed; fatal.
    Fault(io::Error),
}

/// Sole consumer of the event channel and sole writer of the screen.
/// Owns the shutdown decision: quit keys, signals, and backend faults
/// all converge on one release-and-return path.
pub struct Coordinator<S: Screen> {
    screen: S,
    events: Receiver<Event>,
}

impl<S: Screen> Coordinator<S> {
    pub fn new(screen: S, events: Receiver<Event>) -> Self {
        Self { screen, events }
    }

    /// Arbitrate until a shutdown trigger, then restore the terminal.
    /// The screen is released exactly once on every path out.
    pub fn run(mut self) -> Result<()> {
        let verdict = self.arbitrate();
        let restored = self
            .screen
            .release()
            .context("failed to restore the terminal");
        verdict?;
        restored
    }

    fn arbitrate(&mut self) -> Result<()> {
        loop {
            match self.events.recv() {
                Ok(Event::Draw(snapshot)) => {
                    self.draw(&snapshot).context("failed to draw a frame")?;
                }
                Ok(Event::Flush) => {
                    self.screen.flush().context("failed to flush the display")?;
                }
                Ok(Event::Input(event)) if input::is_quit(&event) => {
                    debug!("quit key received");
                    return Ok(());
                }
                Ok(Event::Input(_)) => {}
                Ok(Event::Signal(signal)) => {
                    info!(signal, "termination signal received");
                    return Ok(());
                }
                Ok(Event::Fault(err)) => {
                    return Err(err).context("terminal backend failed");
                }
                // Every producer hung up; nothing left to arbitrate.
                Err(_) => return Ok(()),
            }
        }
    }

    /// Paint one snapshot in full before the next event is accepted.
    /// Clearing resets every cell to blank, so only live cells need an
    /// explicit write. No flush here; the flush ticker sets the display
    /// cadence.
    fn draw(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.screen.clear()?;
        for (x, y, cell) in snapshot.iter_cells() {
            if cell.is_alive() {
                self.screen.set_cell(x as u16, y as u16, LIVE_GLYPH)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Simulation;
    use crate::domain::{Cell, Grid};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use signal_hook::consts::{SIGINT, SIGTERM};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc::{self, SyncSender};
    use std::time::Duration;

    #[derive(Default)]
    struct ScreenLog {
        clears: usize,
        cells: Vec<(u16, u16, char)>,
        flushes: usize,
        releases: usize,
    }

    /// Recording stand-in for the terminal backend.
    #[derive(Clone, Default)]
    struct FakeScreen(Rc<RefCell<ScreenLog>>);

    impl Screen for FakeScreen {
        fn size(&self) -> io::Result<(u16, u16)> {
            Ok((8, 8))
        }

        fn clear(&mut self) -> io::Result<()> {
            self.0.borrow_mut().clears += 1;
            Ok(())
        }

        fn set_cell(&mut self, x: u16, y: u16, glyph: char) -> io::Result<()> {
            self.0.borrow_mut().cells.push((x, y, glyph));
            Ok(())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.0.borrow_mut().flushes += 1;
            Ok(())
        }

        fn release(&mut self) -> io::Result<()> {
            self.0.borrow_mut().releases += 1;
            Ok(())
        }
    }

    fn quit_key() -> Event {
        Event::Input(TermEvent::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )))
    }

    /// Channel pre-filled with a fixed event sequence; the sender is
    /// dropped, so the loop ends after draining even without a shutdown
    /// trigger.
    fn preloaded(events: Vec<Event>) -> Receiver<Event> {
        let (tx, rx) = mpsc::sync_channel(events.len());
        for event in events {
            tx.send(event).expect("preload event");
        }
        rx
    }

    #[test]
    fn draw_paints_exactly_the_live_cells() {
        let mut grid = Grid::new(3, 2);
        grid.set(1, 0, Cell::Alive);
        grid.set(2, 1, Cell::Alive);

        let screen = FakeScreen::default();
        let rx = preloaded(vec![Event::Draw(grid.snapshot()), quit_key()]);
        Coordinator::new(screen.clone(), rx)
            .run()
            .expect("clean shutdown");

        let log = screen.0.borrow();
        assert_eq!(log.clears, 1);
        assert_eq!(log.cells, vec![(1, 0, LIVE_GLYPH), (2, 1, LIVE_GLYPH)]);
        assert_eq!(log.releases, 1);
    }

    #[test]
    fn flush_requests_reach_the_screen() {
        let screen = FakeScreen::default();
        let rx = preloaded(vec![Event::Flush, Event::Flush, quit_key()]);
        Coordinator::new(screen.clone(), rx)
            .run()
            .expect("clean shutdown");
        assert_eq!(screen.0.borrow().flushes, 2);
    }

    #[test]
    fn unrelated_input_is_ignored() {
        let screen = FakeScreen::default();
        let rx = preloaded(vec![
            Event::Input(TermEvent::Key(KeyEvent::new(
                KeyCode::Char('q'),
                KeyModifiers::NONE,
            ))),
            Event::Input(TermEvent::Resize(120, 40)),
            Event::Signal(SIGTERM),
        ]);
        Coordinator::new(screen.clone(), rx)
            .run()
            .expect("clean shutdown");
        assert_eq!(screen.0.borrow().releases, 1);
    }

    #[test]
    fn racing_shutdown_triggers_release_once() {
        let screen = FakeScreen::default();
        let rx = preloaded(vec![Event::Signal(SIGINT), quit_key()]);
        Coordinator::new(screen.clone(), rx)
            .run()
            .expect("clean shutdown");
        assert_eq!(screen.0.borrow().releases, 1);
    }

    #[test]
    fn backend_fault_surfaces_after_release() {
        let screen = FakeScreen::default();
        let rx = preloaded(vec![Event::Fault(io::Error::other("poll failed"))]);
        let err = Coordinator::new(screen.clone(), rx)
            .run()
            .expect_err("fault is fatal");
        assert!(err.to_string().contains("terminal backend failed"));
        assert_eq!(screen.0.borrow().releases, 1);
    }

    #[test]
    fn disconnected_channel_shuts_down_cleanly() {
        let screen = FakeScreen::default();
        let rx = preloaded(vec![]);
        Coordinator::new(screen.clone(), rx)
            .run()
            .expect("clean shutdown");
        assert_eq!(screen.0.borrow().releases, 1);
    }

    #[test]
    fn shutdown_does_not_deadlock_against_a_sending_driver() {
        let (tx, rx) = mpsc::sync_channel(0);
        let driver = Simulation::new(6, 4, Duration::from_millis(1))
            .spawn(tx.clone())
            .expect("spawn driver");
        spawn_quit_after(tx, Duration::from_millis(20));

        let screen = FakeScreen::default();
        Coordinator::new(screen.clone(), rx)
            .run()
            .expect("clean shutdown");

        driver.join().expect("driver exits after the channel closes");
        assert_eq!(screen.0.borrow().releases, 1);
    }

    fn spawn_quit_after(tx: SyncSender<Event>, delay: Duration) {
        std::thread::spawn(move || {
            std::thread::sleep(delay);
            let _ = tx.send(quit_key());
        });
    }
}
