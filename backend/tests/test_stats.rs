//! Tests for aggregation helpers

use admission_simulator_core_rs::stats::{
    mean, std_dev, summarize, Histogram, DEFAULT_HISTOGRAM_PADDING,
};
use admission_simulator_core_rs::{simulate, SimulationConfig};
use proptest::prelude::*;

#[test]
fn test_histogram_spans_observed_range_plus_padding() {
    let hist = Histogram::from_counts(&[3, 5, 5, 7], 4).unwrap();

    assert_eq!(hist.first_bin, -1);
    assert_eq!(hist.last_bin(), 11);
    assert_eq!(hist.counts.len(), 13);
    assert_eq!(hist.density_at(5), 0.5);
    assert_eq!(hist.density_at(3), 0.25);
    assert_eq!(hist.density_at(4), 0.0);
    assert_eq!(hist.density_at(100), 0.0);
}

#[test]
fn test_histogram_includes_maximum() {
    let hist = Histogram::from_counts(&[0, 9], 0).unwrap();
    assert_eq!(hist.density_at(9), 0.5);
}

#[test]
fn test_bins_iterate_in_order() {
    let hist = Histogram::from_counts(&[2, 2, 4], 1).unwrap();
    let values: Vec<i64> = hist.bins().map(|(v, _)| v).collect();
    assert_eq!(values, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_constant_series() {
    let summary = summarize(&[6, 6, 6], 0).unwrap();

    assert_eq!(summary.mean, 6.0);
    assert_eq!(summary.std_dev, 0.0);
    assert_eq!(summary.min, 6);
    assert_eq!(summary.max, 6);
    assert_eq!(summary.histogram.densities, vec![1.0]);
}

#[test]
fn test_summary_of_simulated_series() {
    let config = SimulationConfig {
        capacity: 200,
        trial_count: 500,
        ..SimulationConfig::default()
    };
    let result = simulate(config).unwrap();
    let series = result.admitted_infected();

    let summary = summarize(&series, DEFAULT_HISTOGRAM_PADDING).unwrap();
    let area: f64 = summary.histogram.densities.iter().sum();

    assert!((area - 1.0).abs() < 1e-9);
    assert_eq!(Some(summary.mean), mean(&series));
    assert_eq!(Some(summary.std_dev), std_dev(&series));
}

proptest! {
    #[test]
    fn prop_histogram_is_a_density(
        values in prop::collection::vec(0u32..300, 1..200),
        padding in 0u32..6,
    ) {
        let hist = Histogram::from_counts(&values, padding).unwrap();
        let min = *values.iter().min().unwrap() as i64;
        let max = *values.iter().max().unwrap() as i64;

        prop_assert_eq!(hist.first_bin, min - padding as i64);
        prop_assert_eq!(hist.last_bin(), max + padding as i64);

        let area: f64 = hist.densities.iter().sum();
        prop_assert!((area - 1.0).abs() < 1e-9);

        let total: u32 = hist.counts.iter().sum();
        prop_assert_eq!(total as usize, values.len());
    }

    #[test]
    fn prop_mean_within_bounds(values in prop::collection::vec(0u32..1_000, 1..100)) {
        let m = mean(&values).unwrap();
        let min = *values.iter().min().unwrap() as f64;
        let max = *values.iter().max().unwrap() as f64;
        prop_assert!(m >= min - 1e-9 && m <= max + 1e-9);
    }
}
