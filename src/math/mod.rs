//! Mathematical utilities for generation and analysis

/// Probability shaping helpers for frontier selection
pub mod probability;
/// Seeded random source with a single floating-point contract
pub mod rng;

pub use rng::RandomSource;
