//! PyO3 entry points for running simulations

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{parse_simulation_config, report_means_to_py, result_to_py};
use crate::config::SimulationConfig;
use crate::policy::compare_policies;
use crate::report::ComparisonReport;
use crate::simulator::Simulator;
use crate::stats::DEFAULT_HISTOGRAM_PADDING;

/// Hold one event and return `(admitted_infected, rejected_infected,
/// rejected_uninfected)`, one entry per Monte Carlo run.
///
/// Keyword names follow the established Python API: `vax_rate`,
/// `vax_eff`, `pos_frac` (prevalence), `test_specifity`, `test_vax`,
/// `test_unvax`, `N` (capacity) and `bootstrap` (trial count). `rng_seed`
/// is an addition. [`event_config`] maps them onto a [`SimulationConfig`].
///
/// To hold a 2G event set `vax_rate` to 1; to hold an event without
/// restrictions set both testing flags to False.
///
/// # Example (from Python)
///
/// ```python
/// from admission_simulator_core_rs import event
///
/// inside, caught, false_alarms = event(N=200, bootstrap=10_000)
/// print(sum(inside) / len(inside))
/// ```
#[pyfunction]
#[pyo3(signature = (
    vax_rate = 0.8,
    vax_eff = 0.66,
    pos_frac = 0.01,
    test_sensitivity = 0.8,
    test_specifity = 0.97,
    test_vax = false,
    test_unvax = true,
    N = 1_000,
    bootstrap = 1_000,
    rng_seed = 42
))]
#[allow(clippy::too_many_arguments, non_snake_case)]
pub fn event(
    vax_rate: f64,
    vax_eff: f64,
    pos_frac: f64,
    test_sensitivity: f64,
    test_specifity: f64,
    test_vax: bool,
    test_unvax: bool,
    N: u32,
    bootstrap: u32,
    rng_seed: u64,
) -> PyResult<(Vec<u32>, Vec<u32>, Vec<u32>)> {
    let config = event_config(
        vax_rate,
        vax_eff,
        pos_frac,
        test_sensitivity,
        test_specifity,
        test_vax,
        test_unvax,
        N,
        bootstrap,
        rng_seed,
    );

    let simulator =
        Simulator::new(config).map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))?;
    let result = simulator.run();

    Ok((
        result.admitted_infected(),
        result.rejected_infected(),
        result.rejected_uninfected(),
    ))
}

/// Arguments of [`event`] in positional order, as a configuration
#[allow(clippy::too_many_arguments)]
pub fn event_config(
    vax_rate: f64,
    vax_eff: f64,
    pos_frac: f64,
    test_sensitivity: f64,
    test_specifity: f64,
    test_vax: bool,
    test_unvax: bool,
    capacity: u32,
    bootstrap: u32,
    rng_seed: u64,
) -> SimulationConfig {
    SimulationConfig {
        vaccination_rate: vax_rate,
        vaccine_efficacy: vax_eff,
        prevalence: pos_frac,
        test_sensitivity,
        test_specificity: test_specifity,
        test_vaccinated: test_vax,
        test_unvaccinated: test_unvax,
        capacity,
        trial_count: bootstrap,
        rng_seed,
    }
}

/// Run a configuration given as a dict and return every counter series
#[pyfunction]
pub fn simulate<'py>(py: Python<'py>, config: &Bound<'py, PyDict>) -> PyResult<Bound<'py, PyDict>> {
    let config = parse_simulation_config(config)?;
    let simulator =
        Simulator::new(config).map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))?;
    result_to_py(py, &simulator.run())
}

/// Compare all four policies and return the mean of every counter
#[pyfunction]
pub fn compare<'py>(py: Python<'py>, config: &Bound<'py, PyDict>) -> PyResult<Bound<'py, PyDict>> {
    let base = parse_simulation_config(config)?;
    let comparison =
        compare_policies(&base).map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))?;
    let report = ComparisonReport::from_comparison(&comparison, DEFAULT_HISTOGRAM_PADDING)
        .map_err(|e| PyErr::new::<PyRuntimeError, _>(e.to_string()))?;
    report_means_to_py(py, &report)
}
