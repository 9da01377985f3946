//! Admission policies
//!
//! The four policies compared by the simulator form a closed set. Each one
//! is either a full simulation of a re-parameterized configuration or an
//! exact transform of another policy's result:
//!
//! | Policy          | Vaccination rate | Tested              | Derivation                |
//! |-----------------|------------------|---------------------|---------------------------|
//! | 3G              | as configured    | unvaccinated        | simulated                 |
//! | Test everyone   | as configured    | everyone            | simulated                 |
//! | 2G              | forced to 1      | unvaccinated (none) | simulated                 |
//! | No restriction  | as configured    | nobody              | transform of the 3G run   |
//!
//! Testing changes which candidates are admitted and therefore how many
//! draws a trial consumes, so the tested variants cannot be derived from
//! one another. Letting everyone in can: every candidate the 3G door turned
//! away simply walks in as well.
//!
//! # Example
//!
//! ```rust
//! use admission_simulator_core_rs::policy::{compare_policies, PolicyKind};
//! use admission_simulator_core_rs::SimulationConfig;
//!
//! let base = SimulationConfig {
//!     capacity: 100,
//!     trial_count: 50,
//!     ..SimulationConfig::default()
//! };
//!
//! let comparison = compare_policies(&base).unwrap();
//! let three_g = comparison.get(PolicyKind::ThreeG);
//! let open = comparison.get(PolicyKind::NoRestriction);
//! assert_eq!(three_g.len(), open.len());
//! ```

use crate::config::SimulationConfig;
use crate::models::{SimulationResult, Tally, TrialOutcome};
use crate::rng::splitmix64;
use crate::simulator::{SimulationError, Simulator};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// The named admission policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PolicyKind {
    /// Vaccinated admitted untested, unvaccinated need a negative test
    ThreeG,
    /// Everyone is tested regardless of vaccination status
    TestEveryone,
    /// Only vaccinated people arrive
    TwoG,
    /// Nobody is tested or turned away
    NoRestriction,
}

/// How a policy's result is obtained
#[derive(Debug, Clone, PartialEq)]
pub enum Derivation {
    /// Run a full simulation with this configuration
    Simulate(SimulationConfig),
    /// Transform the result of another policy
    TransformOf(PolicyKind),
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::ThreeG,
        PolicyKind::TestEveryone,
        PolicyKind::TwoG,
        PolicyKind::NoRestriction,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PolicyKind::ThreeG => "3G",
            PolicyKind::TestEveryone => "Test everyone",
            PolicyKind::TwoG => "2G",
            PolicyKind::NoRestriction => "No restriction",
        }
    }

    /// Distinguishes the random streams of variants sharing a base seed.
    /// 3G keeps the base seed so it reproduces a plain run of the base config.
    /// No restriction reuses the 3G trials, so it shares their stream.
    fn seed_salt(self) -> u64 {
        match self {
            PolicyKind::ThreeG | PolicyKind::NoRestriction => 0,
            PolicyKind::TestEveryone => 1,
            PolicyKind::TwoG => 2,
        }
    }

    fn variant_seed(self, base_seed: u64) -> u64 {
        match self.seed_salt() {
            0 => base_seed,
            salt => splitmix64(base_seed ^ salt),
        }
    }

    /// Describe how to obtain this policy from the shared base parameters
    pub fn derivation(self, base: &SimulationConfig) -> Derivation {
        let seed = self.variant_seed(base.rng_seed);
        match self {
            PolicyKind::ThreeG => {
                Derivation::Simulate(base.clone().with_testing(false, true).with_seed(seed))
            }
            PolicyKind::TestEveryone => {
                Derivation::Simulate(base.clone().with_testing(true, true).with_seed(seed))
            }
            PolicyKind::TwoG => Derivation::Simulate(
                base.clone()
                    .with_vaccination_rate(1.0)
                    .with_testing(false, true)
                    .with_seed(seed),
            ),
            PolicyKind::NoRestriction => Derivation::TransformOf(PolicyKind::ThreeG),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Let everyone who arrived during each base trial in.
///
/// Trial `i` of the output is computed from trial `i` of `base` only:
/// rejected cells are added to the admitted cells and the rejected side is
/// zeroed. The vaccination split is carried over.
pub fn derive_no_restriction(base: &SimulationResult) -> SimulationResult {
    let outcomes = base
        .iter()
        .map(|outcome| TrialOutcome {
            admitted: outcome.admitted.merged(&outcome.rejected),
            rejected: Tally::default(),
        })
        .collect();
    SimulationResult::new(outcomes)
}

/// Configuration of the simulation a policy's result ultimately comes from
pub fn simulated_config(kind: PolicyKind, base: &SimulationConfig) -> SimulationConfig {
    match kind.derivation(base) {
        Derivation::Simulate(config) => config,
        Derivation::TransformOf(source) => simulated_config(source, base),
    }
}

/// Run a single policy.
///
/// Transform-derived policies run their source policy first.
pub fn run_policy(
    kind: PolicyKind,
    base: &SimulationConfig,
) -> Result<SimulationResult, SimulationError> {
    match kind.derivation(base) {
        Derivation::Simulate(config) => Ok(Simulator::new(config)?.run()),
        Derivation::TransformOf(source) => {
            let source_result = run_policy(source, base)?;
            Ok(derive_no_restriction(&source_result))
        }
    }
}

/// Results of all four policies for one set of base parameters
#[derive(Debug, Clone)]
pub struct PolicyComparison {
    pub base: SimulationConfig,
    three_g: SimulationResult,
    test_everyone: SimulationResult,
    two_g: SimulationResult,
    no_restriction: SimulationResult,
}

impl PolicyComparison {
    pub fn get(&self, kind: PolicyKind) -> &SimulationResult {
        match kind {
            PolicyKind::ThreeG => &self.three_g,
            PolicyKind::TestEveryone => &self.test_everyone,
            PolicyKind::TwoG => &self.two_g,
            PolicyKind::NoRestriction => &self.no_restriction,
        }
    }

    /// Policies in display order
    pub fn iter(&self) -> impl Iterator<Item = (PolicyKind, &SimulationResult)> {
        PolicyKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// Simulate 3G, test-everyone and 2G concurrently and derive no-restriction.
///
/// All three configurations are validated before any trial runs, so an
/// invalid variant never leaves partial results behind.
pub fn compare_policies(base: &SimulationConfig) -> Result<PolicyComparison, SimulationError> {
    let three_g = Simulator::new(simulated_config(PolicyKind::ThreeG, base))?;
    let test_everyone = Simulator::new(simulated_config(PolicyKind::TestEveryone, base))?;
    let two_g = Simulator::new(simulated_config(PolicyKind::TwoG, base))?;

    info!(
        capacity = base.capacity,
        trials = base.trial_count,
        seed = base.rng_seed,
        "comparing admission policies"
    );

    let (three_g, (test_everyone, two_g)) = rayon::join(
        || three_g.run(),
        || rayon::join(|| test_everyone.run(), || two_g.run()),
    );
    let no_restriction = derive_no_restriction(&three_g);

    Ok(PolicyComparison {
        base: base.clone(),
        three_g,
        test_everyone,
        two_g,
        no_restriction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivations_force_policy_parameters() {
        let base = SimulationConfig {
            vaccination_rate: 0.6,
            ..SimulationConfig::default()
        }
        .with_testing(true, false);

        match PolicyKind::ThreeG.derivation(&base) {
            Derivation::Simulate(c) => {
                assert!(!c.test_vaccinated && c.test_unvaccinated);
                assert_eq!(c.rng_seed, base.rng_seed);
            }
            other => panic!("unexpected derivation {:?}", other),
        }
        match PolicyKind::TestEveryone.derivation(&base) {
            Derivation::Simulate(c) => assert!(c.test_vaccinated && c.test_unvaccinated),
            other => panic!("unexpected derivation {:?}", other),
        }
        match PolicyKind::TwoG.derivation(&base) {
            Derivation::Simulate(c) => {
                assert_eq!(c.vaccination_rate, 1.0);
                assert_ne!(c.rng_seed, base.rng_seed);
            }
            other => panic!("unexpected derivation {:?}", other),
        }
        assert_eq!(
            PolicyKind::NoRestriction.derivation(&base),
            Derivation::TransformOf(PolicyKind::ThreeG)
        );
    }

    #[test]
    fn test_variant_seeds_are_distinct() {
        let seeds: Vec<u64> = PolicyKind::ALL
            .iter()
            .filter(|k| {
                matches!(
                    k.derivation(&SimulationConfig::default()),
                    Derivation::Simulate(_)
                )
            })
            .map(|k| k.variant_seed(42))
            .collect();
        assert_eq!(seeds.len(), 3);
        for i in 0..seeds.len() {
            for j in (i + 1)..seeds.len() {
                assert_ne!(seeds[i], seeds[j]);
            }
        }
    }

    #[test]
    fn test_no_restriction_shares_three_g_stream() {
        assert_eq!(
            PolicyKind::NoRestriction.variant_seed(42),
            PolicyKind::ThreeG.variant_seed(42)
        );
        assert_eq!(PolicyKind::ThreeG.variant_seed(42), 42);
    }

    #[test]
    fn test_labels() {
        assert_eq!(PolicyKind::ThreeG.to_string(), "3G");
        assert_eq!(PolicyKind::NoRestriction.label(), "No restriction");
    }
}
