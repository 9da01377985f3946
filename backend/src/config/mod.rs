//! Simulation configuration and validation
//!
//! A [`SimulationConfig`] describes one admission policy run: who arrives
//! (vaccination rate, prevalence, vaccine efficacy), how arrivals are
//! screened (test characteristics and which segments are tested), and how
//! much work to do (venue capacity, number of Monte Carlo trials).
//!
//! # Validation
//!
//! The simulator performs no clamping. Every probability, including the
//! derived infection probability of a vaccinated candidate, is checked
//! here before any trial starts:
//!
//! ```
//! use admission_simulator_core_rs::{ConfigError, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     prevalence: 0.8,
//!     vaccine_efficacy: -0.5, // 0.8 * 1.5 = 1.2 > 1
//!     ..SimulationConfig::default()
//! };
//!
//! assert!(matches!(
//!     config.validate(),
//!     Err(ConfigError::DerivedProbabilityOutOfRange { .. })
//! ));
//! ```

use crate::analytic::DrawProbabilities;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building or loading a configuration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a probability in [0, 1], got {value}")]
    ProbabilityOutOfRange { field: &'static str, value: f64 },

    #[error("vaccine_efficacy must lie in [-1, 1], got {value}")]
    EfficacyOutOfRange { value: f64 },

    #[error(
        "infection probability of vaccinated candidates (prevalence * (1 - vaccine_efficacy)) \
         must lie in [0, 1], got {value}"
    )]
    DerivedProbabilityOutOfRange { value: f64 },

    #[error("trial_count must be at least 1")]
    NoTrials,

    #[error("no candidate can ever be admitted, so a venue of capacity {capacity} never fills")]
    AdmissionImpossible { capacity: u32 },

    #[error(
        "expected {expected:.3e} rejections per trial exceed the limit of {limit:.0e}; \
         admission is too unlikely for a venue of capacity {capacity}"
    )]
    RejectionsUnbounded {
        capacity: u32,
        expected: f64,
        limit: f64,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Config serialization failed: {0}")]
    Serialization(String),
}

/// Parameter set for one simulated admission policy.
///
/// All fields are plain data; call [`SimulationConfig::validate`] (or build a
/// [`crate::Simulator`], which does so) before trusting a hand-built value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fraction of arriving candidates who are vaccinated
    pub vaccination_rate: f64,

    /// Multiplicative risk reduction for vaccinated candidates (may be negative)
    pub vaccine_efficacy: f64,

    /// Probability an unvaccinated candidate is infected
    pub prevalence: f64,

    /// P(test positive | infected)
    pub test_sensitivity: f64,

    /// P(test negative | uninfected)
    pub test_specificity: f64,

    /// Whether vaccinated candidates are tested before admission
    pub test_vaccinated: bool,

    /// Whether unvaccinated candidates are tested before admission
    pub test_unvaccinated: bool,

    /// Number of people admitted per trial
    pub capacity: u32,

    /// Number of independent Monte Carlo repetitions
    pub trial_count: u32,

    /// Base seed; each trial derives its own stream from it
    pub rng_seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            vaccination_rate: 0.8,
            vaccine_efficacy: 0.66,
            prevalence: 0.01,
            test_sensitivity: 0.8,
            test_specificity: 0.97,
            test_vaccinated: false,
            test_unvaccinated: true,
            capacity: 1_000,
            trial_count: 1_000,
            rng_seed: 42,
        }
    }
}

/// Percent-valued inputs as entered on an interactive control surface.
///
/// Ranges accepted by the front end: capacity 0..=10 000, prevalence
/// 0.001..=100 %, efficacy -100..=100 %, vaccination rate, sensitivity and
/// specificity 0..=100 %.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentInputs {
    pub capacity: u32,
    pub prevalence_pct: f64,
    pub vaccine_efficacy_pct: f64,
    pub vaccination_rate_pct: f64,
    pub test_sensitivity_pct: f64,
    pub test_specificity_pct: f64,
}

impl Default for PercentInputs {
    fn default() -> Self {
        Self {
            capacity: 100,
            prevalence_pct: 1.0,
            vaccine_efficacy_pct: 66.0,
            vaccination_rate_pct: 80.0,
            test_sensitivity_pct: 80.0,
            test_specificity_pct: 97.0,
        }
    }
}

/// Trials run per policy when driven from percent inputs
pub const INTERACTIVE_TRIAL_COUNT: u32 = 10_000;

/// Largest accepted `capacity * P(reject) / P(admit)`, the mean number of
/// people turned away before one venue fills. Tally cells are `u32`.
pub const MAX_EXPECTED_REJECTIONS: f64 = 1.0e8;

/// Optional percent-valued overrides applied on top of a configuration.
///
/// Unset fields leave the configuration untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PercentOverrides {
    pub capacity: Option<u32>,
    pub prevalence_pct: Option<f64>,
    pub vaccine_efficacy_pct: Option<f64>,
    pub vaccination_rate_pct: Option<f64>,
    pub test_sensitivity_pct: Option<f64>,
    pub test_specificity_pct: Option<f64>,
}

impl From<PercentInputs> for PercentOverrides {
    fn from(inputs: PercentInputs) -> Self {
        Self {
            capacity: Some(inputs.capacity),
            prevalence_pct: Some(inputs.prevalence_pct),
            vaccine_efficacy_pct: Some(inputs.vaccine_efficacy_pct),
            vaccination_rate_pct: Some(inputs.vaccination_rate_pct),
            test_sensitivity_pct: Some(inputs.test_sensitivity_pct),
            test_specificity_pct: Some(inputs.test_specificity_pct),
        }
    }
}

fn set_from_percent(target: &mut f64, pct: Option<f64>) {
    if let Some(pct) = pct {
        *target = pct / 100.0;
    }
}

fn check_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    // NaN fails `contains`
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { field, value })
    }
}

impl SimulationConfig {
    /// Build a 3G configuration from percent-valued front-end inputs.
    ///
    /// The result is validated before it is returned.
    pub fn from_percentages(inputs: PercentInputs) -> Result<Self, ConfigError> {
        let config = Self {
            trial_count: INTERACTIVE_TRIAL_COUNT,
            ..Self::default()
        }
        .with_testing(false, true)
        .with_percentages(&inputs.into());
        config.validate()?;
        Ok(config)
    }

    /// Overwrite the fields named in `overrides`, converting percent to
    /// probability. The result is not validated.
    pub fn with_percentages(mut self, overrides: &PercentOverrides) -> Self {
        if let Some(capacity) = overrides.capacity {
            self.capacity = capacity;
        }
        set_from_percent(&mut self.prevalence, overrides.prevalence_pct);
        set_from_percent(&mut self.vaccine_efficacy, overrides.vaccine_efficacy_pct);
        set_from_percent(&mut self.vaccination_rate, overrides.vaccination_rate_pct);
        set_from_percent(&mut self.test_sensitivity, overrides.test_sensitivity_pct);
        set_from_percent(&mut self.test_specificity, overrides.test_specificity_pct);
        self
    }

    /// Parse a configuration from JSON and validate it.
    ///
    /// Missing fields take their [`Default`] values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialization(e.to_string()))
    }

    /// Infection probability of a vaccinated candidate
    pub fn vaccinated_infection_probability(&self) -> f64 {
        self.prevalence * (1.0 - self.vaccine_efficacy)
    }

    /// Check every field; the first violation found is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("vaccination_rate", self.vaccination_rate)?;
        check_probability("prevalence", self.prevalence)?;
        check_probability("test_sensitivity", self.test_sensitivity)?;
        check_probability("test_specificity", self.test_specificity)?;

        if !(-1.0..=1.0).contains(&self.vaccine_efficacy) {
            return Err(ConfigError::EfficacyOutOfRange {
                value: self.vaccine_efficacy,
            });
        }

        let derived = self.vaccinated_infection_probability();
        if !(0.0..=1.0).contains(&derived) {
            return Err(ConfigError::DerivedProbabilityOutOfRange { value: derived });
        }

        if self.trial_count == 0 {
            return Err(ConfigError::NoTrials);
        }

        if self.capacity > 0 {
            let draws = DrawProbabilities::from_config(self);
            let admit = draws.admit();
            if admit <= 0.0 {
                return Err(ConfigError::AdmissionImpossible {
                    capacity: self.capacity,
                });
            }

            let expected = f64::from(self.capacity) * draws.rejected.total() / admit;
            if expected > MAX_EXPECTED_REJECTIONS {
                return Err(ConfigError::RejectionsUnbounded {
                    capacity: self.capacity,
                    expected,
                    limit: MAX_EXPECTED_REJECTIONS,
                });
            }
        }

        Ok(())
    }

    pub fn with_vaccination_rate(mut self, vaccination_rate: f64) -> Self {
        self.vaccination_rate = vaccination_rate;
        self
    }

    pub fn with_testing(mut self, test_vaccinated: bool, test_unvaccinated: bool) -> Self {
        self.test_vaccinated = test_vaccinated;
        self.test_unvaccinated = test_unvaccinated;
        self
    }

    pub fn with_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }
}
