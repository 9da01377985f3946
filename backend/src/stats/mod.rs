//! Aggregation of per-trial counters
//!
//! Reduces a counter series to its sample mean and a unit-width histogram
//! normalised to a probability density. Each series is binned over its own
//! observed range; nothing is shared between policies.

use serde::{Deserialize, Serialize};

/// Empty bins added on each side of the observed range
pub const DEFAULT_HISTOGRAM_PADDING: u32 = 4;

pub fn mean(values: &[u32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    Some(sum as f64 / values.len() as f64)
}

/// Population standard deviation
pub fn std_dev(values: &[u32]) -> Option<f64> {
    let m = mean(values)?;
    let var = values
        .iter()
        .map(|&v| {
            let d = f64::from(v) - m;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64;
    Some(var.sqrt())
}

/// Frequency histogram with unit-width integer bins.
///
/// Bin `k` covers the integer value `first_bin + k`. Densities sum to one,
/// so with unit width the area under the histogram is one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub first_bin: i64,
    pub counts: Vec<u32>,
    pub densities: Vec<f64>,
}

impl Histogram {
    /// Bin `values` from `min - padding` through `max + padding`.
    ///
    /// Returns `None` for an empty series.
    pub fn from_counts(values: &[u32], padding: u32) -> Option<Self> {
        let min = i64::from(*values.iter().min()?);
        let max = i64::from(*values.iter().max()?);
        let padding = i64::from(padding);

        let first_bin = min - padding;
        let bin_count = (max + padding - first_bin + 1) as usize;

        let mut counts = vec![0u32; bin_count];
        for &value in values {
            counts[(i64::from(value) - first_bin) as usize] += 1;
        }

        let total = values.len() as f64;
        let densities = counts.iter().map(|&c| f64::from(c) / total).collect();

        Some(Self {
            first_bin,
            counts,
            densities,
        })
    }

    /// Value covered by the last bin
    pub fn last_bin(&self) -> i64 {
        self.first_bin + self.counts.len() as i64 - 1
    }

    /// `(value, density)` pairs in ascending order
    pub fn bins(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.densities
            .iter()
            .enumerate()
            .map(move |(k, &d)| (self.first_bin + k as i64, d))
    }

    /// Density at `value`; zero outside the binned range
    pub fn density_at(&self, value: i64) -> f64 {
        if value < self.first_bin || value > self.last_bin() {
            return 0.0;
        }
        self.densities[(value - self.first_bin) as usize]
    }
}

/// Summary of one counter series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub min: u32,
    pub max: u32,
    pub histogram: Histogram,
}

/// Summarize a series; `None` when it is empty
pub fn summarize(values: &[u32], padding: u32) -> Option<CounterSummary> {
    Some(CounterSummary {
        mean: mean(values)?,
        std_dev: std_dev(values)?,
        min: *values.iter().min()?,
        max: *values.iter().max()?,
        histogram: Histogram::from_counts(values, padding)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std_dev() {
        let values = [2, 4, 4, 4, 5, 5, 7, 9];
        assert_eq!(mean(&values), Some(5.0));
        assert_eq!(std_dev(&values), Some(2.0));
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(mean(&[]), None);
        assert!(Histogram::from_counts(&[], 4).is_none());
        assert!(summarize(&[], 4).is_none());
    }

    #[test]
    fn test_padding_can_go_negative() {
        let hist = Histogram::from_counts(&[0, 1, 1], 2).unwrap();
        assert_eq!(hist.first_bin, -2);
        assert_eq!(hist.last_bin(), 3);
        assert_eq!(hist.counts, vec![0, 0, 1, 2, 0, 0]);
    }
}
