use super::coordinator::Event;
use crate::domain::{Grid, Snapshot};
use std::io;
use std::sync::mpsc::SyncSender;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Fraction of cells seeded alive at startup.
const LIVE_DENSITY: f64 = 0.4;

/// Simulation driver: exclusive owner of the grid and the generation
/// counter. Nothing else ever mutates the grid; everything downstream
/// sees snapshots.
pub struct Simulation {
    grid: Grid,
    generation: u64,
    period: Duration,
}

impl Simulation {
    /// Seed a randomized world sized to the display.
    pub fn new(width: usize, height: usize, period: Duration) -> Self {
        let mut grid = Grid::new(width, height);
        grid.randomize(&mut rand::rng(), LIVE_DENSITY);
        Self {
            grid,
            generation: 0,
            period,
        }
    }

    /// Completed generations so far
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance exactly one generation
    pub fn tick(&mut self) {
        self.grid.step();
        self.generation += 1;
    }

    pub fn snapshot(&self) -> Snapshot {
        self.grid.snapshot()
    }

    /// Tick on a fixed cadence, handing a snapshot to the coordinator
    /// after every generation. The seeded field goes out before the
    /// first tick. Each send blocks until the coordinator consumes it;
    /// a failed send means the coordinator hung up, and the final
    /// generation count is returned.
    fn run(mut self, events: &SyncSender<Event>) -> u64 {
        if events.send(Event::Draw(self.snapshot())).is_err() {
            return self.generation;
        }

        let mut deadline = Instant::now() + self.period;
        loop {
            thread::sleep(deadline.saturating_duration_since(Instant::now()));
            deadline += self.period;

            self.tick();
            if events.send(Event::Draw(self.snapshot())).is_err() {
                return self.generation;
            }
        }
    }

    /// Spawn the driver thread. The join value is the final generation
    /// count.
    pub fn spawn(self, events: SyncSender<Event>) -> io::Result<JoinHandle<u64>> {
        thread::Builder::new()
            .name("life-sim".to_string())
            .spawn(move || self.run(&events))
    }
}
