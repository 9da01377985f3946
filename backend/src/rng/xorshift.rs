//! xorshift64* random number generator
//!
//! Fast 64-bit PRNG used for every candidate draw. It passes TestU01's
//! BigCrush and keeps a single `u64` of state, so each trial can own a
//! private generator without contention.
//!
//! # Determinism
//!
//! Same seed → same sequence of draws. Per-trial generators are derived
//! from `(base_seed, trial_index)`, so a run is reproducible bit-for-bit
//! no matter how many worker threads execute it.

use serde::{Deserialize, Serialize};

/// Golden-ratio increment used by splitmix64
const SPLITMIX_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// One round of splitmix64.
///
/// Used to turn correlated inputs (consecutive trial indices) into
/// well-spread xorshift seeds.
pub fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(SPLITMIX_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use admission_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let value = rng.next();
/// let coin = rng.bernoulli(0.5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// # Example
    /// ```
    /// use admission_simulator_core_rs::RngManager;
    ///
    /// let rng = RngManager::new(12345);
    /// assert_eq!(rng.get_state(), 12345);
    /// ```
    pub fn new(seed: u64) -> Self {
        // Ensure seed is never zero (xorshift requirement)
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Create the private generator for one trial of a run.
    ///
    /// Streams for different `trial_index` values are independent, and the
    /// stream for a given `(base_seed, trial_index)` never changes.
    ///
    /// # Example
    /// ```
    /// use admission_simulator_core_rs::RngManager;
    ///
    /// let mut a = RngManager::for_trial(42, 7);
    /// let mut b = RngManager::for_trial(42, 7);
    /// assert_eq!(a.next(), b.next());
    /// ```
    pub fn for_trial(base_seed: u64, trial_index: u64) -> Self {
        let mixed = splitmix64(base_seed ^ splitmix64(trial_index));
        Self::new(mixed)
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Get current RNG state
    pub fn get_state(&self) -> u64 {
        self.state
    }

    /// Generate random f64 in range [0.0, 1.0)
    ///
    /// # Example
    /// ```
    /// use admission_simulator_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let u = rng.next_f64();
    /// assert!(u >= 0.0 && u < 1.0);
    /// ```
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // Top 53 bits → [0.0, 1.0)
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Draw `true` with probability `p`.
    ///
    /// `p <= 0` never fires and `p >= 1` always fires, because the uniform
    /// draw lies in [0, 1).
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let rng = RngManager::new(0);
        assert_ne!(rng.get_state(), 0, "Zero seed should be converted to 1");
    }

    #[test]
    fn test_next_f64_in_range() {
        let mut rng = RngManager::new(12345);

        for _ in 0..1000 {
            let val = rng.next_f64();
            assert!(
                (0.0..1.0).contains(&val),
                "next_f64() produced value {} outside [0.0, 1.0)",
                val
            );
        }
    }

    #[test]
    fn test_bernoulli_extremes() {
        let mut rng = RngManager::new(777);

        for _ in 0..1000 {
            assert!(!rng.bernoulli(0.0));
            assert!(rng.bernoulli(1.0));
        }
    }

    #[test]
    fn test_splitmix_spreads_adjacent_inputs() {
        let a = splitmix64(1);
        let b = splitmix64(2);
        assert_ne!(a, b);
        // Adjacent inputs should differ in many bits, not just the low ones
        assert!((a ^ b).count_ones() > 16);
    }
}
