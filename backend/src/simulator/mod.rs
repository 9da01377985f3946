//! Admission simulator - the Monte Carlo trial loop
//!
//! See `engine.rs` for the implementation.

pub mod engine;

// Re-export main types for convenience
pub use engine::{screen, simulate, DoorDecision, SimulationError, Simulator};
