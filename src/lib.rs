// Domain layer - automaton state and rule evaluation
pub mod domain;

// Application layer - simulation driver and event coordination
pub mod application;

// Infrastructure layer - terminal rendering and input sources
pub mod input;
pub mod rendering;

// Re-exports for convenience
pub use application::{Coordinator, Event, Simulation};
pub use domain::{Cell, Grid, Snapshot};
pub use rendering::{Screen, TerminalScreen};
