mod coordinator;
mod simulation;

pub use coordinator::{Coordinator, Event};
pub use simulation::Simulation;
