/// Simulation: session state, world ownership, and the per-tick step.

pub mod event;
pub mod session;
pub mod step;
pub mod world;
