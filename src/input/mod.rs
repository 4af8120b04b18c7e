pub mod signals;

use crate::application::Event;
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers};
use std::io;
use std::sync::mpsc::SyncSender;
use std::thread::{self, JoinHandle};

/// Forward every terminal event to the coordinator. Blocks on the
/// backend's event read; a read failure is reported once as a fault and
/// ends the thread.
pub fn spawn_poller(events: SyncSender<Event>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("input-poll".to_string())
        .spawn(move || poll_loop(&events))
}

fn poll_loop(events: &SyncSender<Event>) {
    loop {
        match event::read() {
            Ok(event) => {
                if events.send(Event::Input(event)).is_err() {
                    return;
                }
            }
            Err(err) => {
                let _ = events.send(Event::Fault(err));
                return;
            }
        }
    }
}

/// The two conventional interrupt chords, Ctrl-C and Ctrl-Z, on key
/// press only.
pub fn is_quit(event: &TermEvent) -> bool {
    match event {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
            key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('z'))
        }
        _ => false,
    }
}
