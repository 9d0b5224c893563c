// src/rng/mod.rs
//! Uniform Random Number Generation for Monte Carlo Simulations
//!
//! # Design Philosophy
//!
//! Every generator produces vectors of `dimensionality` independent uniforms in the
//! open interval (0, 1), one vector per simulated path:
//! 1. **Reproducibility**: `set_seed(s)` makes the generator replay the sequence of a
//!    generator freshly built with seed `s`; `reset()` rewinds to that point
//! 2. **Skip-ahead**: `skip(n)` lands on the same state as drawing and discarding `n`
//!    vectors, which is what lets independent batches own disjoint streams
//! 3. **Layering**: decorators such as [`AntiThetic`] wrap another generator and
//!    forward seeding and dimensionality changes to it
//!
//! # Gaussian Mapping
//!
//! Gaussian variates come from inverting the uniforms through the Beasley-Springer/Moro
//! approximation of Φ⁻¹, so antithetic uniforms `(u, 1 - u)` map onto `(z, -z)`.

mod antithetic;
mod counter;
mod park_miller;
mod std_random;

pub use antithetic::AntiThetic;
pub use counter::CounterGenerator;
pub use park_miller::ParkMiller;
pub use std_random::StdGenerator;

use crate::math_utils::inverse_cumulative_normal;
use std::fmt;

/// Source of uniform variates over a fixed dimensionality
pub trait UniformGenerator: fmt::Debug + Send {
    fn dimensionality(&self) -> usize;

    /// Fill `variates` (sized to the current dimensionality) with uniforms in (0, 1)
    fn get_uniforms(&mut self, variates: &mut [f64]);

    /// Advance as if `number_of_paths` uniform vectors had been drawn and discarded
    fn skip(&mut self, number_of_paths: u64);

    fn set_seed(&mut self, seed: u64);

    fn reset(&mut self);

    fn reset_dimensionality(&mut self, new_dimensionality: usize);

    fn clone_box(&self) -> Box<dyn UniformGenerator>;

    /// Standard normal variates obtained by inverting one vector of uniforms
    fn get_gaussians(&mut self, variates: &mut [f64]) {
        self.get_uniforms(variates);
        for value in variates.iter_mut() {
            *value = inverse_cumulative_normal(*value);
        }
    }
}

impl Clone for Box<dyn UniformGenerator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
