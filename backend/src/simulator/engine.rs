//! Trial engine
//!
//! One trial fills a venue to exactly `capacity` admitted people by
//! drawing candidates until enough of them pass the door:
//!
//! ```text
//!            ┌──────────── rejected (counted) ────────────┐
//!            ▼                                            │
//! Filling ─ draw candidate ─ tested? ─ yes ─ test positive?┘
//!    ▲                          │ no            │ no
//!    │                          ▼               ▼
//!    └────── admitted < N ── admit (counted) ◄──┘
//!                               │ admitted == N
//!                               ▼
//!                              Done
//! ```
//!
//! Trials share nothing but the read-only configuration. Each owns an
//! [`RngManager`] derived from `(rng_seed, trial_index)` and runs on the
//! rayon pool, so the result is identical for any number of threads.
//!
//! # Termination
//!
//! The loop is unbounded. Validation guarantees a strictly positive
//! admission probability per draw, so it ends with probability one; the
//! expected number of draws is `capacity / P(admit)`.

use crate::config::{ConfigError, SimulationConfig};
use crate::models::{Candidate, SimulationResult, TrialOutcome};
use crate::rng::RngManager;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, debug_span};

/// Errors surfaced by the simulation entry points
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// What happens to a candidate at the door
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorDecision {
    Admitted,
    Rejected,
}

/// Screen one candidate.
///
/// Untested candidates are always admitted and consume no further
/// randomness. Tested candidates consume exactly one uniform: infected ones
/// are caught with probability `test_sensitivity`, uninfected ones are
/// wrongly flagged with probability `1 - test_specificity`.
pub fn screen(
    candidate: Candidate,
    config: &SimulationConfig,
    rng: &mut RngManager,
) -> DoorDecision {
    if !candidate.is_tested(config) {
        return DoorDecision::Admitted;
    }

    let positive_probability = if candidate.infected {
        config.test_sensitivity
    } else {
        1.0 - config.test_specificity
    };

    if rng.bernoulli(positive_probability) {
        DoorDecision::Rejected
    } else {
        DoorDecision::Admitted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FillState {
    Filling,
    Done,
}

/// Runs admission trials for one validated configuration
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    /// Create a simulator, validating the configuration first.
    ///
    /// # Example
    ///
    /// ```rust
    /// use admission_simulator_core_rs::{SimulationConfig, Simulator};
    ///
    /// let config = SimulationConfig {
    ///     capacity: 50,
    ///     trial_count: 20,
    ///     ..SimulationConfig::default()
    /// };
    ///
    /// let result = Simulator::new(config).unwrap().run();
    /// assert_eq!(result.len(), 20);
    /// ```
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run all trials in parallel and collect them in trial order
    pub fn run(&self) -> SimulationResult {
        let span = debug_span!(
            "simulate",
            capacity = self.config.capacity,
            trials = self.config.trial_count,
            seed = self.config.rng_seed,
        );
        let _enter = span.enter();

        let seed = self.config.rng_seed;
        let outcomes: Vec<TrialOutcome> = (0..self.config.trial_count)
            .into_par_iter()
            .map(|trial| {
                let mut rng = RngManager::for_trial(seed, u64::from(trial));
                self.run_trial(&mut rng)
            })
            .collect();

        let draws: u64 = outcomes
            .iter()
            .map(|o| u64::from(o.candidates_drawn()))
            .sum();
        debug!(trials = outcomes.len(), candidates_drawn = draws, "run complete");

        SimulationResult::new(outcomes)
    }

    /// Fill one venue to capacity using the given random stream
    pub fn run_trial(&self, rng: &mut RngManager) -> TrialOutcome {
        let capacity = self.config.capacity;
        let mut outcome = TrialOutcome::default();
        let mut state = if capacity == 0 {
            FillState::Done
        } else {
            FillState::Filling
        };

        while state == FillState::Filling {
            let candidate = Candidate::draw(&self.config, rng);

            match screen(candidate, &self.config, rng) {
                DoorDecision::Rejected => outcome.rejected.record(candidate),
                DoorDecision::Admitted => {
                    outcome.admitted.record(candidate);
                    if outcome.admitted.total() == capacity {
                        state = FillState::Done;
                    }
                }
            }
        }

        outcome
    }
}

/// Validate `config` and run it in one call
pub fn simulate(config: SimulationConfig) -> Result<SimulationResult, SimulationError> {
    Ok(Simulator::new(config)?.run())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            capacity: 30,
            trial_count: 16,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_untested_candidate_consumes_no_randomness() {
        let config = SimulationConfig::default().with_testing(false, false);
        let mut rng = RngManager::new(99);
        let before = rng.get_state();

        let decision = screen(
            Candidate {
                vaccinated: false,
                infected: true,
            },
            &config,
            &mut rng,
        );

        assert_eq!(decision, DoorDecision::Admitted);
        assert_eq!(rng.get_state(), before);
    }

    #[test]
    fn test_perfect_test_catches_infected() {
        let config = SimulationConfig {
            test_sensitivity: 1.0,
            test_specificity: 1.0,
            ..SimulationConfig::default()
        }
        .with_testing(true, true);
        let mut rng = RngManager::new(3);

        for _ in 0..200 {
            let infected = Candidate {
                vaccinated: true,
                infected: true,
            };
            let healthy = Candidate {
                vaccinated: false,
                infected: false,
            };
            assert_eq!(screen(infected, &config, &mut rng), DoorDecision::Rejected);
            assert_eq!(screen(healthy, &config, &mut rng), DoorDecision::Admitted);
        }
    }

    #[test]
    fn test_trial_fills_exactly_to_capacity() {
        let simulator = Simulator::new(small_config()).unwrap();
        let mut rng = RngManager::new(11);

        let outcome = simulator.run_trial(&mut rng);
        assert_eq!(outcome.admitted.total(), 30);
    }

    #[test]
    fn test_zero_capacity_draws_nothing() {
        let config = SimulationConfig {
            capacity: 0,
            ..small_config()
        };
        let simulator = Simulator::new(config).unwrap();
        let mut rng = RngManager::new(11);
        let before = rng.get_state();

        let outcome = simulator.run_trial(&mut rng);
        assert_eq!(outcome, TrialOutcome::default());
        assert_eq!(rng.get_state(), before);
    }

    #[test]
    fn test_invalid_config_rejected_before_running() {
        let config = SimulationConfig {
            vaccination_rate: 1.2,
            ..small_config()
        };
        assert!(matches!(
            Simulator::new(config),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_run_matches_sequential_trials() {
        let simulator = Simulator::new(small_config()).unwrap();
        let parallel = simulator.run();

        for (i, outcome) in parallel.iter().enumerate() {
            let mut rng = RngManager::for_trial(simulator.config().rng_seed, i as u64);
            assert_eq!(*outcome, simulator.run_trial(&mut rng), "trial {} differs", i);
        }
    }
}
