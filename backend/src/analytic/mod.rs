//! Closed-form expectations for a single trial
//!
//! Every draw is independent and identically distributed, so the trial is a
//! negative-binomial experiment: draws continue until `capacity` successes
//! (admissions) have occurred. With per-draw admission probability `a`,
//!
//! - E[admitted in class c] = N · P(admit ∧ c) / a
//! - E[rejected in class c] = N · P(reject ∧ c) / a
//!
//! These values are the reference the Monte Carlo estimator converges to.
//! The simulator never uses them.

use crate::config::SimulationConfig;
use crate::models::Counter;
use serde::{Deserialize, Serialize};

/// Per-draw probabilities of each infection × vaccination cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CellProbabilities {
    pub infected_vaccinated: f64,
    pub infected_unvaccinated: f64,
    pub uninfected_vaccinated: f64,
    pub uninfected_unvaccinated: f64,
}

impl CellProbabilities {
    pub fn infected(&self) -> f64 {
        self.infected_vaccinated + self.infected_unvaccinated
    }

    pub fn uninfected(&self) -> f64 {
        self.uninfected_vaccinated + self.uninfected_unvaccinated
    }

    pub fn vaccinated(&self) -> f64 {
        self.infected_vaccinated + self.uninfected_vaccinated
    }

    pub fn unvaccinated(&self) -> f64 {
        self.infected_unvaccinated + self.uninfected_unvaccinated
    }

    pub fn total(&self) -> f64 {
        self.infected() + self.uninfected()
    }
}

/// Joint probabilities of (cell, door decision) for one candidate draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawProbabilities {
    pub admitted: CellProbabilities,
    pub rejected: CellProbabilities,
}

impl DrawProbabilities {
    pub fn from_config(config: &SimulationConfig) -> Self {
        let vr = config.vaccination_rate;
        let q_vaccinated = config.vaccinated_infection_probability();
        let q_unvaccinated = config.prevalence;

        let reject_infected = config.test_sensitivity;
        let reject_uninfected = 1.0 - config.test_specificity;
        let vaccinated_tested = if config.test_vaccinated { 1.0 } else { 0.0 };
        let unvaccinated_tested = if config.test_unvaccinated { 1.0 } else { 0.0 };

        let arrivals = CellProbabilities {
            infected_vaccinated: vr * q_vaccinated,
            infected_unvaccinated: (1.0 - vr) * q_unvaccinated,
            uninfected_vaccinated: vr * (1.0 - q_vaccinated),
            uninfected_unvaccinated: (1.0 - vr) * (1.0 - q_unvaccinated),
        };

        let rejected = CellProbabilities {
            infected_vaccinated: arrivals.infected_vaccinated * vaccinated_tested * reject_infected,
            infected_unvaccinated: arrivals.infected_unvaccinated
                * unvaccinated_tested
                * reject_infected,
            uninfected_vaccinated: arrivals.uninfected_vaccinated
                * vaccinated_tested
                * reject_uninfected,
            uninfected_unvaccinated: arrivals.uninfected_unvaccinated
                * unvaccinated_tested
                * reject_uninfected,
        };

        let admitted = CellProbabilities {
            infected_vaccinated: arrivals.infected_vaccinated - rejected.infected_vaccinated,
            infected_unvaccinated: arrivals.infected_unvaccinated - rejected.infected_unvaccinated,
            uninfected_vaccinated: arrivals.uninfected_vaccinated - rejected.uninfected_vaccinated,
            uninfected_unvaccinated: arrivals.uninfected_unvaccinated
                - rejected.uninfected_unvaccinated,
        };

        Self { admitted, rejected }
    }

    /// Probability that a single draw is admitted
    pub fn admit(&self) -> f64 {
        self.admitted.total()
    }
}

/// Expected value of every reported counter for one trial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedOutcome {
    pub admitted_infected: f64,
    pub admitted_uninfected: f64,
    pub rejected_infected: f64,
    pub rejected_uninfected: f64,
    pub admitted_vaccinated: f64,
    pub admitted_unvaccinated: f64,
}

impl ExpectedOutcome {
    pub fn get(&self, counter: Counter) -> f64 {
        match counter {
            Counter::AdmittedInfected => self.admitted_infected,
            Counter::AdmittedUninfected => self.admitted_uninfected,
            Counter::RejectedInfected => self.rejected_infected,
            Counter::RejectedUninfected => self.rejected_uninfected,
            Counter::AdmittedVaccinated => self.admitted_vaccinated,
            Counter::AdmittedUnvaccinated => self.admitted_unvaccinated,
        }
    }

    /// Expectation after letting every rejected candidate in.
    ///
    /// Mirrors the trial-wise no-restriction transform by linearity.
    pub fn no_restriction(&self, draws: &DrawProbabilities, capacity: u32) -> Self {
        let scale = capacity as f64 / draws.admit();
        Self {
            admitted_infected: self.admitted_infected + self.rejected_infected,
            admitted_uninfected: self.admitted_uninfected + self.rejected_uninfected,
            rejected_infected: 0.0,
            rejected_uninfected: 0.0,
            admitted_vaccinated: self.admitted_vaccinated + scale * draws.rejected.vaccinated(),
            admitted_unvaccinated: self.admitted_unvaccinated
                + scale * draws.rejected.unvaccinated(),
        }
    }
}

/// Expected counters for one trial under `config`.
///
/// Returns `None` when a non-empty venue could never fill (zero admission
/// probability). A capacity of zero gives all-zero expectations.
pub fn expected_outcome(config: &SimulationConfig) -> Option<ExpectedOutcome> {
    let draws = DrawProbabilities::from_config(config);
    let n = config.capacity as f64;

    if config.capacity == 0 {
        return Some(ExpectedOutcome {
            admitted_infected: 0.0,
            admitted_uninfected: 0.0,
            rejected_infected: 0.0,
            rejected_uninfected: 0.0,
            admitted_vaccinated: 0.0,
            admitted_unvaccinated: 0.0,
        });
    }

    let admit = draws.admit();
    if admit <= 0.0 {
        return None;
    }

    let scale = n / admit;
    Some(ExpectedOutcome {
        admitted_infected: scale * draws.admitted.infected(),
        admitted_uninfected: scale * draws.admitted.uninfected(),
        rejected_infected: scale * draws.rejected.infected(),
        rejected_uninfected: scale * draws.rejected.uninfected(),
        admitted_vaccinated: scale * draws.admitted.vaccinated(),
        admitted_unvaccinated: scale * draws.admitted.unvaccinated(),
    })
}
