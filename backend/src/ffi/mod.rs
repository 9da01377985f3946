//! Python bindings
//!
//! Thin PyO3 layer so a Python presentation layer (sliders, histograms,
//! pictograms) can drive the simulator. Enabled with the `pyo3` feature.

pub mod simulator;
pub mod types;
