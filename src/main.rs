use std::io;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use termlife::{Coordinator, Screen, Simulation, TerminalScreen, input, rendering};
use tracing::info;

/// One generation per tick interval.
const TICK_PERIOD: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    init_tracing();

    // Acquire the terminal before any simulation state exists; a failure
    // here exits without anything to tear down.
    let screen = TerminalScreen::acquire().context("failed to acquire the terminal")?;
    let (width, height) = screen.size().context("failed to query the terminal size")?;
    info!(width, height, "starting simulation");

    // One rendezvous channel fans every event source into the
    // coordinator; each send blocks until consumed.
    let (events, inbox) = mpsc::sync_channel(0);

    let driver = Simulation::new(width as usize, height as usize, TICK_PERIOD)
        .spawn(events.clone())
        .context("failed to start the simulation thread")?;
    rendering::spawn_flush_ticker(events.clone()).context("failed to start the flush ticker")?;
    input::spawn_poller(events.clone()).context("failed to start the input poller")?;
    input::signals::spawn_listener(events).context("failed to register signal handling")?;

    Coordinator::new(screen, inbox).run()?;

    // The coordinator has hung up the channel, so the driver's next send
    // fails and it returns its count.
    let cycles = driver
        .join()
        .map_err(|_| anyhow!("simulation thread panicked"))?;
    println!("{cycles} life cycles");
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}
