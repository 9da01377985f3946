//! Admission Simulator Core - Rust Engine
//!
//! Monte Carlo estimator for indoor-event admission policies (3G, test
//! everyone, 2G, no restriction) under a mixed vaccinated/unvaccinated
//! population with latent infections and imperfect tests.
//!
//! # Architecture
//!
//! - **config**: Simulation parameters and validation
//! - **models**: Candidates, per-trial tallies, collected results
//! - **rng**: Deterministic random number generation
//! - **simulator**: The per-trial rejection-sampling loop
//! - **policy**: Named policies and the no-restriction transform
//! - **stats**: Means and density histograms
//! - **analytic**: Closed-form expectations used as a reference
//! - **report**: Serializable comparison reports
//!
//! # Critical Invariants
//!
//! 1. Every simulated trial admits exactly `capacity` people
//! 2. All randomness is deterministic (seeded per trial)
//! 3. Configurations are validated before any trial runs
//!
//! # Example
//!
//! ```rust
//! use admission_simulator_core_rs::{simulate, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     capacity: 200,
//!     trial_count: 100,
//!     ..SimulationConfig::default()
//! };
//! let result = simulate(config).unwrap();
//! assert!(result.iter().all(|t| t.admitted.total() == 200));
//! ```

// Module declarations
pub mod analytic;
pub mod config;
pub mod models;
pub mod policy;
pub mod report;
pub mod rng;
pub mod simulator;
pub mod stats;

// Re-exports for convenience
pub use analytic::{expected_outcome, DrawProbabilities, ExpectedOutcome};
pub use config::{ConfigError, PercentInputs, PercentOverrides, SimulationConfig};
pub use models::{Candidate, Counter, SimulationResult, Tally, TrialOutcome};
pub use policy::{compare_policies, derive_no_restriction, PolicyComparison, PolicyKind};
pub use report::{ComparisonReport, PolicyReport};
pub use rng::RngManager;
pub use simulator::{simulate, SimulationError, Simulator};
pub use stats::{CounterSummary, Histogram};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn admission_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::simulator::event, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::simulator::simulate, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::simulator::compare, m)?)?;
    Ok(())
}
