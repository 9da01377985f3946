//! Deterministic random number generation
//!
//! Uses xorshift64* for fast, deterministic candidate draws.
//! CRITICAL: All randomness in the simulator MUST go through this module.

mod xorshift;

pub use xorshift::{splitmix64, RngManager};
