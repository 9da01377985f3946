//! Domain models for the admission simulator

pub mod candidate;
pub mod outcome;
pub mod result;

// Re-exports
pub use candidate::Candidate;
pub use outcome::{Tally, TrialOutcome};
pub use result::{Counter, SimulationResult};
