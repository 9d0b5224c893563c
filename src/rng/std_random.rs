// src/rng/std_random.rs
use super::UniformGenerator;
use rand::distributions::Open01;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform generator backed by the platform's standard RNG (`rand::rngs::StdRng`)
///
/// Skipping has no shortcut here: it draws and discards one value per dimension.
#[derive(Debug, Clone)]
pub struct StdGenerator {
    dimensionality: usize,
    initial_seed: u64,
    rng: StdRng,
}

impl StdGenerator {
    pub fn new(dimensionality: usize, seed: u64) -> Self {
        Self {
            dimensionality,
            initial_seed: seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl UniformGenerator for StdGenerator {
    fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    fn get_uniforms(&mut self, variates: &mut [f64]) {
        debug_assert_eq!(variates.len(), self.dimensionality);
        for value in variates.iter_mut() {
            *value = self.rng.sample(Open01);
        }
    }

    fn skip(&mut self, number_of_paths: u64) {
        for _ in 0..number_of_paths.saturating_mul(self.dimensionality as u64) {
            let _: f64 = self.rng.sample(Open01);
        }
    }

    fn set_seed(&mut self, seed: u64) {
        self.initial_seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn reset(&mut self) {
        self.rng = StdRng::seed_from_u64(self.initial_seed);
    }

    fn reset_dimensionality(&mut self, new_dimensionality: usize) {
        self.dimensionality = new_dimensionality;
    }

    fn clone_box(&self) -> Box<dyn UniformGenerator> {
        Box::new(self.clone())
    }
}
