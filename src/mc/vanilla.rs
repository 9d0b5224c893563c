// src/mc/vanilla.rs
//! Vanilla Monte Carlo
//!
//! European payoffs only need the terminal spot, which under deterministic rate and
//! volatility term structures is a single lognormal draw:
//! ```text
//! S_T = S₀ · exp(∫r - ½∫σ²) · exp(√(∫σ²) · Z)
//! ```
//! so each path costs one Gaussian.

use crate::error::{validation::*, McResult};
use crate::mc::payoffs::PayOff;
use crate::mc::statistics::StatisticsGatherer;
use crate::parameters::Parameters;
use crate::rng::UniformGenerator;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanillaOption {
    payoff: PayOff,
    expiry: f64,
}

impl VanillaOption {
    pub fn new(payoff: PayOff, expiry: f64) -> McResult<Self> {
        validate_positive("expiry", expiry)?;
        Ok(Self { payoff, expiry })
    }

    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    pub fn option_payoff(&self, spot: f64) -> f64 {
        self.payoff.evaluate(spot)
    }
}

/// Price `option` with `number_of_paths` terminal draws, one discounted payoff per
/// path dumped into `gatherer`. The generator is resized to dimension one.
pub fn simple_monte_carlo(
    option: &VanillaOption,
    spot: f64,
    vol: &Parameters,
    r: &Parameters,
    number_of_paths: u64,
    gatherer: &mut dyn StatisticsGatherer,
    generator: &mut dyn UniformGenerator,
) -> McResult<()> {
    validate_positive("spot", spot)?;
    generator.reset_dimensionality(1);

    let expiry = option.expiry();
    let variance = vol.integral_square(0.0, expiry);
    let root_variance = variance.sqrt();
    let ito_correction = -0.5 * variance;
    let moved_spot = spot * (r.integral(0.0, expiry) + ito_correction).exp();
    let discounting = (-r.integral(0.0, expiry)).exp();

    let mut variates = [0.0; 1];
    for _ in 0..number_of_paths {
        generator.get_gaussians(&mut variates);
        let this_spot = moved_spot * (root_variance * variates[0]).exp();
        gatherer.dump_one_result(option.option_payoff(this_spot) * discounting);
    }

    tracing::debug!(paths = number_of_paths, expiry, "vanilla simulation finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::statistics::StatisticsMoments;
    use crate::rng::{AntiThetic, ParkMiller};

    #[test]
    fn test_forward_is_priced_without_bias() {
        // E[S_T] is matched exactly in expectation, so a forward converges quickly
        let option = VanillaOption::new(PayOff::Forward { strike: 100.0 }, 1.0).unwrap();
        let mut gatherer = StatisticsMoments::new();
        let mut generator = AntiThetic::new(Box::new(ParkMiller::new(1, 1)));

        simple_monte_carlo(
            &option,
            100.0,
            &Parameters::constant(0.2),
            &Parameters::constant(0.05),
            200_000,
            &mut gatherer,
            &mut generator,
        )
        .unwrap();

        let exact = 100.0 - 100.0 * (-0.05f64).exp();
        let mc = gatherer.mean().unwrap();
        assert!((mc - exact).abs() < 0.1, "forward MC {} vs exact {}", mc, exact);
    }

    #[test]
    fn test_rejects_non_positive_expiry() {
        assert!(VanillaOption::new(PayOff::Call { strike: 100.0 }, 0.0).is_err());
    }
}
