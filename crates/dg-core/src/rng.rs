//! Random number generation for map building
//!
//! Uses a seeded ChaCha RNG so that a seed fully determines the map.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Map random number generator.
///
/// Wraps ChaCha8Rng for reproducible generation. The seed is kept so
/// callers can report or replay it.
#[derive(Debug, Clone)]
pub struct MapRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl MapRng {
    /// Create a new RNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Get the seed used to create this RNG.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns 0..n-1, or 0 if n is 0.
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Integer in lo..hi (hi exclusive); returns lo when the range is empty.
    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        if lo >= hi {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Float in lo..hi.
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        if lo >= hi {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Float in [0, 1).
    pub fn unit_f32(&mut self) -> f32 {
        self.rng.gen_range(0.0..1.0)
    }
}
