// src/rng/antithetic.rs
//! Antithetic Variates Decorator
//!
//! # Algorithm
//!
//! Alternates between two states:
//! - **fresh**: draw `u` from the inner generator, cache `1 - u`, return `u`
//! - **cached**: return the cached `1 - u` without touching the inner generator
//!
//! Under the inverse-CDF Gaussian mapping `1 - u` becomes `-z`, so consecutive paths
//! are mirror images and the inner generator is consulted once per pair.

use super::UniformGenerator;

#[derive(Debug, Clone)]
pub struct AntiThetic {
    inner: Box<dyn UniformGenerator>,
    produce_fresh: bool,
    next_variates: Vec<f64>,
}

impl AntiThetic {
    /// Wrap `inner`, rewinding it to its initial state.
    pub fn new(mut inner: Box<dyn UniformGenerator>) -> Self {
        inner.reset();
        let next_variates = vec![0.0; inner.dimensionality()];
        Self {
            inner,
            produce_fresh: true,
            next_variates,
        }
    }
}

impl UniformGenerator for AntiThetic {
    fn dimensionality(&self) -> usize {
        self.inner.dimensionality()
    }

    fn get_uniforms(&mut self, variates: &mut [f64]) {
        if self.produce_fresh {
            self.inner.get_uniforms(variates);
            for (cached, &u) in self.next_variates.iter_mut().zip(variates.iter()) {
                *cached = 1.0 - u;
            }
            self.produce_fresh = false;
        } else {
            variates.copy_from_slice(&self.next_variates);
            self.produce_fresh = true;
        }
    }

    fn skip(&mut self, mut number_of_paths: u64) {
        if number_of_paths == 0 {
            return;
        }

        // a pending reflection counts as one skipped draw
        if !self.produce_fresh {
            self.produce_fresh = true;
            number_of_paths -= 1;
        }

        self.inner.skip(number_of_paths / 2);

        if number_of_paths % 2 == 1 {
            let mut scratch = vec![0.0; self.dimensionality()];
            self.get_uniforms(&mut scratch);
        }
    }

    fn set_seed(&mut self, seed: u64) {
        self.inner.set_seed(seed);
        self.produce_fresh = true;
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.produce_fresh = true;
    }

    fn reset_dimensionality(&mut self, new_dimensionality: usize) {
        self.inner.reset_dimensionality(new_dimensionality);
        self.next_variates.resize(new_dimensionality, 0.0);
        self.produce_fresh = true;
    }

    fn clone_box(&self) -> Box<dyn UniformGenerator> {
        Box::new(self.clone())
    }
}
