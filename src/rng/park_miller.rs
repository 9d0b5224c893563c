// src/rng/park_miller.rs
//! Park-Miller "minimal standard" linear congruential generator
//!
//! # Algorithm
//!
//! ```text
//! x_{k+1} = 16807 · x_k  mod (2³¹ - 1)
//! ```
//! evaluated with Schrage's decomposition so every intermediate fits in 32-bit
//! signed arithmetic. Uniforms are `x_k / (2³¹ - 1)`, which never hits 0 or 1.
//!
//! Skip-ahead uses `x_{k+n} = aⁿ · x_k mod m` with square-and-multiply, so skipping
//! costs O(log n) and allocates nothing.

use super::UniformGenerator;

const A: i64 = 16_807;
const M: i64 = 2_147_483_647;
const Q: i64 = 127_773;
const R: i64 = 2_836;

#[derive(Debug, Clone, Copy)]
struct MinimalStandard {
    state: i64,
}

impl MinimalStandard {
    fn new(seed: u64) -> Self {
        let mut engine = Self { state: 1 };
        engine.set_seed(seed);
        engine
    }

    fn set_seed(&mut self, seed: u64) {
        self.state = (seed % M as u64) as i64;
        if self.state == 0 {
            self.state = 1;
        }
    }

    fn next_integer(&mut self) -> i64 {
        let k = self.state / Q;
        self.state = A * (self.state - k * Q) - R * k;
        if self.state < 0 {
            self.state += M;
        }
        self.state
    }

    fn jump(&mut self, mut steps: u64) {
        let modulus = M as u64;
        let mut multiplier = A as u64;
        let mut factor = 1u64;
        while steps > 0 {
            if steps & 1 == 1 {
                factor = factor * multiplier % modulus;
            }
            multiplier = multiplier * multiplier % modulus;
            steps >>= 1;
        }
        self.state = (factor * self.state as u64 % modulus) as i64;
    }

    const fn max() -> i64 {
        M - 1
    }
}

/// Multi-dimensional uniform generator on top of the minimal standard LCG
#[derive(Debug, Clone)]
pub struct ParkMiller {
    dimensionality: usize,
    inner: MinimalStandard,
    initial_seed: u64,
    reciprocal: f64,
}

impl ParkMiller {
    pub fn new(dimensionality: usize, seed: u64) -> Self {
        Self {
            dimensionality,
            inner: MinimalStandard::new(seed),
            initial_seed: seed,
            reciprocal: 1.0 / (1.0 + MinimalStandard::max() as f64),
        }
    }
}

impl Default for ParkMiller {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl UniformGenerator for ParkMiller {
    fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    fn get_uniforms(&mut self, variates: &mut [f64]) {
        debug_assert_eq!(variates.len(), self.dimensionality);
        for value in variates.iter_mut() {
            *value = self.inner.next_integer() as f64 * self.reciprocal;
        }
    }

    fn skip(&mut self, number_of_paths: u64) {
        self.inner
            .jump(number_of_paths.saturating_mul(self.dimensionality as u64));
    }

    fn set_seed(&mut self, seed: u64) {
        self.initial_seed = seed;
        self.inner.set_seed(seed);
    }

    fn reset(&mut self) {
        self.inner.set_seed(self.initial_seed);
    }

    /// Also rewinds to the initial seed.
    fn reset_dimensionality(&mut self, new_dimensionality: usize) {
        self.dimensionality = new_dimensionality;
        self.inner.set_seed(self.initial_seed);
    }

    fn clone_box(&self) -> Box<dyn UniformGenerator> {
        Box::new(self.clone())
    }
}
