//! Random test data generation for sortscope.
//!
//! A generator built with a seed always yields the same sequence, which keeps
//! comparison counts reproducible between runs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of random integer samples.
#[derive(Debug, Clone)]
pub struct DataGenerator {
    rng: StdRng,
    seed: Option<u64>,
}

impl DataGenerator {
    /// Creates a generator; `None` seeds from the operating system.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng, seed }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// One integer in `[0, max_exclusive)`. A zero bound yields 0.
    pub fn next_value(&mut self, max_exclusive: i64) -> i64 {
        if max_exclusive <= 0 {
            return 0;
        }
        self.rng.random_range(0..max_exclusive)
    }

    /// Lazily yields `count` integers in `[0, max_exclusive)`.
    pub fn stream(&mut self, count: usize, max_exclusive: i64) -> impl Iterator<Item = i64> + '_ {
        (0..count).map(move |_| self.next_value(max_exclusive))
    }

    /// `count` integers in `[0, max_exclusive)`.
    pub fn values(&mut self, count: usize, max_exclusive: i64) -> Vec<i64> {
        self.stream(count, max_exclusive).collect()
    }
}
