//! Collected results of a simulation run

use super::outcome::TrialOutcome;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Series reported per trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Counter {
    AdmittedInfected,
    AdmittedUninfected,
    RejectedInfected,
    RejectedUninfected,
    AdmittedVaccinated,
    AdmittedUnvaccinated,
}

impl Counter {
    pub const ALL: [Counter; 6] = [
        Counter::AdmittedInfected,
        Counter::AdmittedUninfected,
        Counter::RejectedInfected,
        Counter::RejectedUninfected,
        Counter::AdmittedVaccinated,
        Counter::AdmittedUnvaccinated,
    ];

    /// Read this counter from one trial
    pub fn read(self, outcome: &TrialOutcome) -> u32 {
        match self {
            Counter::AdmittedInfected => outcome.admitted.infected(),
            Counter::AdmittedUninfected => outcome.admitted.uninfected(),
            Counter::RejectedInfected => outcome.rejected.infected(),
            Counter::RejectedUninfected => outcome.rejected.uninfected(),
            Counter::AdmittedVaccinated => outcome.admitted.vaccinated(),
            Counter::AdmittedUnvaccinated => outcome.admitted.unvaccinated(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Counter::AdmittedInfected => "admitted_infected",
            Counter::AdmittedUninfected => "admitted_uninfected",
            Counter::RejectedInfected => "rejected_infected",
            Counter::RejectedUninfected => "rejected_uninfected",
            Counter::AdmittedVaccinated => "admitted_vaccinated",
            Counter::AdmittedUnvaccinated => "admitted_unvaccinated",
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered trial outcomes of one run.
///
/// Index `i` always refers to trial `i`, which is what lets derived
/// policies be computed trial-by-trial from a base run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub outcomes: Vec<TrialOutcome>,
}

impl SimulationResult {
    pub fn new(outcomes: Vec<TrialOutcome>) -> Self {
        Self { outcomes }
    }

    /// One value per trial for the given counter
    pub fn series(&self, counter: Counter) -> Vec<u32> {
        self.outcomes.iter().map(|o| counter.read(o)).collect()
    }

    pub fn admitted_infected(&self) -> Vec<u32> {
        self.series(Counter::AdmittedInfected)
    }

    pub fn rejected_infected(&self) -> Vec<u32> {
        self.series(Counter::RejectedInfected)
    }

    pub fn rejected_uninfected(&self) -> Vec<u32> {
        self.series(Counter::RejectedUninfected)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrialOutcome> {
        self.outcomes.iter()
    }
}
