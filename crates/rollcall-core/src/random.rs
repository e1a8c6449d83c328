//! Jitter sources for approximate contribution counts.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed integers.
pub trait RandomSource: Send + Sync {
    /// Returns a value in `[0, upper)`. `upper` must be non-zero.
    fn below(&self, upper: u32) -> u32;
}

/// Thread-local RNG, the default for live runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn below(&self, upper: u32) -> u32 {
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Reproducible RNG seeded from a fixed value.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn below(&self, upper: u32) -> u32 {
        self.rng
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .gen_range(0..upper)
    }
}

/// Always yields the same value, clamped into range.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub u32);

impl RandomSource for FixedRandom {
    fn below(&self, upper: u32) -> u32 {
        self.0.min(upper.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_random_is_reproducible() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);
        let xs: Vec<u32> = (0..16).map(|_| a.below(100)).collect();
        let ys: Vec<u32> = (0..16).map(|_| b.below(100)).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|&x| x < 100));
    }

    #[test]
    fn test_fixed_random_clamps() {
        assert_eq!(FixedRandom(7).below(100), 7);
        assert_eq!(FixedRandom(500).below(100), 99);
        assert_eq!(FixedRandom(0).below(1), 0);
    }

    #[test]
    fn test_thread_random_in_range() {
        for _ in 0..100 {
            assert!(ThreadRandom.below(3) < 3);
        }
    }
}
