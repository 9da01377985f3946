//! Serializable summaries of a policy comparison
//!
//! A [`ComparisonReport`] is what a presentation layer consumes: per policy
//! and per counter, the sample mean, spread and density histogram, next to
//! the closed-form expectation. The report is tagged with a SHA-256 hash of
//! the base configuration so two reports can be checked for comparability.

use crate::analytic::{expected_outcome, DrawProbabilities, ExpectedOutcome};
use crate::config::SimulationConfig;
use crate::models::Counter;
use crate::policy::{simulated_config, Derivation, PolicyComparison, PolicyKind};
use crate::simulator::SimulationError;
use crate::stats::{summarize, CounterSummary};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Summary of one counter under one policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterReport {
    pub counter: Counter,
    pub summary: CounterSummary,
    /// Closed-form expectation, when defined
    pub expected: Option<f64>,
}

/// Everything reported for one policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyReport {
    pub policy: PolicyKind,
    pub label: String,
    pub trials: usize,
    pub counters: Vec<CounterReport>,
}

impl PolicyReport {
    pub fn counter(&self, counter: Counter) -> Option<&CounterReport> {
        self.counters.iter().find(|c| c.counter == counter)
    }

    pub fn mean(&self, counter: Counter) -> Option<f64> {
        self.counter(counter).map(|c| c.summary.mean)
    }
}

/// Full report of a [`PolicyComparison`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub config: SimulationConfig,
    /// SHA256 hash of the base config
    pub config_hash: String,
    pub policies: Vec<PolicyReport>,
}

impl ComparisonReport {
    /// Summarize every policy and counter of `comparison`.
    ///
    /// `padding` is the number of empty histogram bins on each side.
    pub fn from_comparison(
        comparison: &PolicyComparison,
        padding: u32,
    ) -> Result<Self, SimulationError> {
        let base = &comparison.base;

        let policies = comparison
            .iter()
            .map(|(kind, result)| {
                let expected = policy_expectation(kind, base);
                let counters = Counter::ALL
                    .iter()
                    .filter_map(|&counter| {
                        let summary = summarize(&result.series(counter), padding)?;
                        Some(CounterReport {
                            counter,
                            summary,
                            expected: expected.map(|e| e.get(counter)),
                        })
                    })
                    .collect();

                PolicyReport {
                    policy: kind,
                    label: kind.label().to_string(),
                    trials: result.len(),
                    counters,
                }
            })
            .collect();

        Ok(Self {
            config: base.clone(),
            config_hash: compute_config_hash(base)?,
            policies,
        })
    }

    pub fn policy(&self, kind: PolicyKind) -> Option<&PolicyReport> {
        self.policies.iter().find(|p| p.policy == kind)
    }

    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SimulationError::SerializationError(format!("Report: {}", e)))
    }
}

/// Closed-form expectation of a policy under `base`
pub fn policy_expectation(kind: PolicyKind, base: &SimulationConfig) -> Option<ExpectedOutcome> {
    match kind.derivation(base) {
        Derivation::Simulate(config) => expected_outcome(&config),
        Derivation::TransformOf(source) => {
            let config = simulated_config(source, base);
            let draws = DrawProbabilities::from_config(&config);
            let source_expected = expected_outcome(&config)?;
            if config.capacity == 0 {
                return Some(source_expected);
            }
            Some(source_expected.no_restriction(&draws, config.capacity))
        }
    }
}

/// Compute deterministic SHA256 hash of a configuration.
///
/// Uses canonical JSON with sorted keys so the hash does not depend on
/// field declaration order.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config).map_err(|e| {
        SimulationError::SerializationError(format!("Config serialization failed: {}", e))
    })?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        SimulationError::SerializationError(format!("Canonical JSON failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
