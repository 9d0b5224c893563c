// src/math_utils.rs
//! Normal distribution helpers used by the generators and the analytic formulas.

use statrs::function::erf;
use std::f64::consts::SQRT_2;

const ONE_OVER_ROOT_TWO_PI: f64 = 0.398_942_280_401_433;

// Beasley-Springer central region
const BSM_A: [f64; 4] = [
    2.50662823884,
    -18.61500062529,
    41.39119773534,
    -25.44106049637,
];
const BSM_B: [f64; 4] = [
    -8.47351093090,
    23.08336743743,
    -21.06224101826,
    3.13082909833,
];
// Moro tails
const MORO_C: [f64; 9] = [
    0.3374754822726147,
    0.9761690190917186,
    0.1607979714918209,
    0.0276438810333863,
    0.0038405729373609,
    0.0003951896511919,
    0.0000321767881768,
    0.0000002888167364,
    0.0000003960315187,
];

/// Standard normal probability density function
///
/// # Formula
/// ```text
/// φ(x) = (1/√(2π)) * exp(-x²/2)
/// ```
pub fn norm_pdf(x: f64) -> f64 {
    ONE_OVER_ROOT_TWO_PI * (-0.5 * x * x).exp()
}

pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf::erf(x / SQRT_2))
}

/// Inverse of the standard normal CDF via the Beasley-Springer/Moro approximation
///
/// The Beasley-Springer rational function covers `|u - 0.5| < 0.42`; outside that
/// band Moro's Chebyshev fit in `ln(-ln(r))` takes over. The input must lie in
/// the open interval (0, 1).
pub fn inverse_cumulative_normal(u: f64) -> f64 {
    let x = u - 0.5;

    if x.abs() < 0.42 {
        let y = x * x;
        let num = x * (((BSM_A[3] * y + BSM_A[2]) * y + BSM_A[1]) * y + BSM_A[0]);
        let den = (((BSM_B[3] * y + BSM_B[2]) * y + BSM_B[1]) * y + BSM_B[0]) * y + 1.0;
        num / den
    } else {
        let tail = if x > 0.0 { 1.0 - u } else { u };
        let r = (-tail.ln()).ln();
        let value = MORO_C
            .iter()
            .rev()
            .fold(0.0, |acc, &c| c + r * acc);
        if x < 0.0 {
            -value
        } else {
            value
        }
    }
}

pub struct Timer {
    start_time: std::time::Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: std::time::Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_normal_midpoint() {
        assert!(inverse_cumulative_normal(0.5).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_normal_round_trips_cdf() {
        for &x in &[-4.0, -2.5, -1.0, -0.3, 0.0, 0.7, 1.5, 3.0, 4.5] {
            let u = norm_cdf(x);
            let back = inverse_cumulative_normal(u);
            assert!(
                (back - x).abs() < 1e-6,
                "inverse({}) = {}, expected {}",
                u,
                back,
                x
            );
        }
    }

    #[test]
    fn test_inverse_normal_is_odd() {
        for &u in &[0.001, 0.05, 0.2, 0.4] {
            let lo = inverse_cumulative_normal(u);
            let hi = inverse_cumulative_normal(1.0 - u);
            assert!((lo + hi).abs() < 1e-9, "asymmetry at {}: {} vs {}", u, lo, hi);
        }
    }

    #[test]
    fn test_norm_pdf_peak() {
        assert!((norm_pdf(0.0) - 1.0 / (2.0 * std::f64::consts::PI).sqrt()).abs() < 1e-12);
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-12);
    }
}
