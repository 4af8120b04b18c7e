use crate::application::Event;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use std::io;
use std::sync::mpsc::SyncSender;
use std::thread::{self, JoinHandle};

/// Register for interrupt/terminate delivery and forward each signal
/// into the event channel. Registration happens before the thread
/// starts, so a failure surfaces at startup.
pub fn spawn_listener(events: SyncSender<Event>) -> io::Result<JoinHandle<()>> {
    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    thread::Builder::new()
        .name("signal-listen".to_string())
        .spawn(move || {
            for signal in signals.forever() {
                if events.send(Event::Signal(signal)).is_err() {
                    return;
                }
            }
        })
}
