//! Arriving candidates
//!
//! A candidate is one person walking up to the door. Both flags are latent:
//! the simulator only ever looks at them to decide which counter to bump.

use crate::config::SimulationConfig;
use crate::rng::RngManager;

/// One random arrival
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub vaccinated: bool,
    pub infected: bool,
}

impl Candidate {
    /// Draw a candidate from the population described by `config`.
    ///
    /// Vaccination status is drawn first, then infection status conditioned
    /// on it. Exactly two uniforms are consumed.
    pub fn draw(config: &SimulationConfig, rng: &mut RngManager) -> Self {
        let vaccinated = rng.bernoulli(config.vaccination_rate);
        let infection_probability = if vaccinated {
            config.vaccinated_infection_probability()
        } else {
            config.prevalence
        };
        let infected = rng.bernoulli(infection_probability);

        Self {
            vaccinated,
            infected,
        }
    }

    /// Whether the policy in `config` tests this candidate at the door
    pub fn is_tested(&self, config: &SimulationConfig) -> bool {
        if self.vaccinated {
            config.test_vaccinated
        } else {
            config.test_unvaccinated
        }
    }
}
