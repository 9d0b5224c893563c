// src/rng/counter.rs
//! Counter-based uniform generator
//!
//! # Algorithm
//!
//! Uses a splitmix64 finalizer over `(seed, counter)`:
//! ```text
//! z = base_seed + counter
//! z = (z ⊕ (z >> 30)) * 0xbf58476d1ce4e5b9
//! z = (z ⊕ (z >> 27)) * 0x94d049bb133111eb
//! output = z ⊕ (z >> 31)
//! ```
//!
//! The state is just the counter, so `skip` is a single addition no matter how far
//! ahead it jumps.

use super::UniformGenerator;

const TWO_POW_MINUS_53: f64 = 1.0 / 9_007_199_254_740_992.0;

#[derive(Debug, Clone)]
pub struct CounterGenerator {
    dimensionality: usize,
    base_seed: u64,
    counter: u64,
}

impl CounterGenerator {
    pub fn new(dimensionality: usize, seed: u64) -> Self {
        Self {
            dimensionality,
            base_seed: seed,
            counter: 0,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.counter = self.counter.wrapping_add(1);
        let mut z = self.base_seed.wrapping_add(self.counter);
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9u64);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111ebu64);
        z ^ (z >> 31)
    }

    /// Midpoint of one of 2⁵³ equal cells, so strictly inside (0, 1)
    fn uniform(&mut self) -> f64 {
        ((self.next_u64() >> 11) as f64 + 0.5) * TWO_POW_MINUS_53
    }
}

impl UniformGenerator for CounterGenerator {
    fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    fn get_uniforms(&mut self, variates: &mut [f64]) {
        debug_assert_eq!(variates.len(), self.dimensionality);
        for value in variates.iter_mut() {
            *value = self.uniform();
        }
    }

    fn skip(&mut self, number_of_paths: u64) {
        self.counter = self
            .counter
            .wrapping_add(number_of_paths.wrapping_mul(self.dimensionality as u64));
    }

    fn set_seed(&mut self, seed: u64) {
        self.base_seed = seed;
        self.counter = 0;
    }

    fn reset(&mut self) {
        self.counter = 0;
    }

    fn reset_dimensionality(&mut self, new_dimensionality: usize) {
        self.dimensionality = new_dimensionality;
    }

    fn clone_box(&self) -> Box<dyn UniformGenerator> {
        Box::new(self.clone())
    }
}
