//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, lists).

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::config::SimulationConfig;
use crate::models::{Counter, SimulationResult};
use crate::report::ComparisonReport;

/// Extract a field with a default value if missing.
///
/// # Errors
/// Returns error only if type conversion fails (not if field is missing)
fn extract_with_default<T>(dict: &Bound<'_, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: for<'py> FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

/// Convert Python dict to a validated SimulationConfig
///
/// Missing keys take the library defaults.
///
/// # Errors
///
/// Raises ValueError if a value has the wrong type or fails validation.
pub fn parse_simulation_config(py_config: &Bound<'_, PyDict>) -> PyResult<SimulationConfig> {
    let d = SimulationConfig::default();
    let config = SimulationConfig {
        vaccination_rate: extract_with_default(py_config, "vaccination_rate", d.vaccination_rate)?,
        vaccine_efficacy: extract_with_default(py_config, "vaccine_efficacy", d.vaccine_efficacy)?,
        prevalence: extract_with_default(py_config, "prevalence", d.prevalence)?,
        test_sensitivity: extract_with_default(py_config, "test_sensitivity", d.test_sensitivity)?,
        test_specificity: extract_with_default(py_config, "test_specificity", d.test_specificity)?,
        test_vaccinated: extract_with_default(py_config, "test_vaccinated", d.test_vaccinated)?,
        test_unvaccinated: extract_with_default(
            py_config,
            "test_unvaccinated",
            d.test_unvaccinated,
        )?,
        capacity: extract_with_default(py_config, "capacity", d.capacity)?,
        trial_count: extract_with_default(py_config, "trial_count", d.trial_count)?,
        rng_seed: extract_with_default(py_config, "rng_seed", d.rng_seed)?,
    };

    config
        .validate()
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;
    Ok(config)
}

/// Convert a SimulationResult to a dict of per-counter lists
pub fn result_to_py<'py>(
    py: Python<'py>,
    result: &SimulationResult,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    for counter in Counter::ALL {
        dict.set_item(counter.name(), result.series(counter))?;
    }
    Ok(dict)
}

/// Convert a report to a dict of `{policy label: {counter: mean}}`
pub fn report_means_to_py<'py>(
    py: Python<'py>,
    report: &ComparisonReport,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    for policy in &report.policies {
        let means = PyDict::new_bound(py);
        for counter in &policy.counters {
            means.set_item(counter.counter.name(), counter.summary.mean)?;
        }
        dict.set_item(policy.label.as_str(), means)?;
    }
    dict.set_item("config_hash", report.config_hash.as_str())?;
    Ok(dict)
}
