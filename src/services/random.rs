// src/services/random.rs
// DOCUMENTATION: Injectable random source
// PURPOSE: Every placeholder value (distance, rating, sort jitter, template
// choice) draws from here so tests can pin the values

use rand::Rng;

/// Source of uniform values in [0, 1)
pub trait RandomSource {
    fn next_f64(&self) -> f64;

    /// Uniform value in [low, high)
    fn range(&self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Uniform index in 0..len; `len` must be non-zero
    fn index(&self, len: usize) -> usize {
        ((self.next_f64() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

/// Thread-local RNG from `rand`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

#[cfg(test)]
pub mod testing {
    use super::RandomSource;

    /// Always returns the same value
    #[derive(Debug, Clone, Copy)]
    pub struct FixedRandom(pub f64);

    impl RandomSource for FixedRandom {
        fn next_f64(&self) -> f64 {
            self.0
        }
    }
}
