// src/parameters.rs
//! Deterministic term-structure parameters (rates, dividend yields, volatilities)
//!
//! A parameter is only ever consumed through definite integrals:
//! ```text
//! Integral(t₁, t₂)       = ∫ p(t) dt
//! IntegralSquare(t₁, t₂) = ∫ p(t)² dt
//! ```
//! over `[t₁, t₂]`. Both are additive over partitions, which is what lets the path
//! engine precompute per-step drifts and variances once.
//!
//! [`Parameters`] owns a boxed [`ParametersInner`] and deep-clones it, so instances can
//! be passed around by value with independent lifetimes.

use crate::error::{validation::validate_increasing, McError, McResult};
use std::fmt;

/// Shape of a time-dependent parameter
pub trait ParametersInner: fmt::Debug + Send + Sync {
    fn integral(&self, time1: f64, time2: f64) -> f64;
    fn integral_square(&self, time1: f64, time2: f64) -> f64;
    fn clone_box(&self) -> Box<dyn ParametersInner>;
}

#[derive(Debug)]
pub struct Parameters {
    inner: Box<dyn ParametersInner>,
}

impl Parameters {
    pub fn new<P: ParametersInner + 'static>(inner: P) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(ConstantParameter::new(value))
    }

    pub fn integral(&self, time1: f64, time2: f64) -> f64 {
        self.inner.integral(time1, time2)
    }

    pub fn integral_square(&self, time1: f64, time2: f64) -> f64 {
        self.inner.integral_square(time1, time2)
    }

    /// Average value over the interval. `time1 == time2` is the caller's problem.
    pub fn mean(&self, time1: f64, time2: f64) -> f64 {
        self.integral(time1, time2) / (time2 - time1)
    }

    pub fn root_mean_square(&self, time1: f64, time2: f64) -> f64 {
        (self.integral_square(time1, time2) / (time2 - time1)).sqrt()
    }
}

impl Clone for Parameters {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_box(),
        }
    }
}

impl From<f64> for Parameters {
    fn from(value: f64) -> Self {
        Parameters::constant(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantParameter {
    constant: f64,
    constant_square: f64,
}

impl ConstantParameter {
    pub fn new(constant: f64) -> Self {
        Self {
            constant,
            constant_square: constant * constant,
        }
    }
}

impl ParametersInner for ConstantParameter {
    fn integral(&self, time1: f64, time2: f64) -> f64 {
        (time2 - time1) * self.constant
    }

    fn integral_square(&self, time1: f64, time2: f64) -> f64 {
        (time2 - time1) * self.constant_square
    }

    fn clone_box(&self) -> Box<dyn ParametersInner> {
        Box::new(*self)
    }
}

/// Piecewise-constant parameter
///
/// `values[i]` applies on `(end_times[i-1], end_times[i]]`; the first value extends
/// back to -∞ and the last one forward past the final end time.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseConstantParameter {
    end_times: Vec<f64>,
    values: Vec<f64>,
}

impl PiecewiseConstantParameter {
    pub fn new(end_times: Vec<f64>, values: Vec<f64>) -> McResult<Self> {
        validate_increasing("end_times", &end_times)?;
        if end_times.len() != values.len() {
            return Err(McError::dimension(
                "piecewise parameter values",
                end_times.len(),
                values.len(),
            ));
        }
        Ok(Self { end_times, values })
    }

    fn accumulate<F: Fn(f64) -> f64>(&self, time1: f64, time2: f64, f: F) -> f64 {
        let mut start = f64::NEG_INFINITY;
        let mut total = 0.0;
        let last = self.values.len() - 1;

        for (i, &value) in self.values.iter().enumerate() {
            let end = if i == last {
                f64::INFINITY
            } else {
                self.end_times[i]
            };
            let overlap = time2.min(end) - time1.max(start);
            if overlap > 0.0 {
                total += f(value) * overlap;
            }
            start = end;
        }
        total
    }
}

impl ParametersInner for PiecewiseConstantParameter {
    fn integral(&self, time1: f64, time2: f64) -> f64 {
        self.accumulate(time1, time2, |v| v)
    }

    fn integral_square(&self, time1: f64, time2: f64) -> f64 {
        self.accumulate(time1, time2, |v| v * v)
    }

    fn clone_box(&self) -> Box<dyn ParametersInner> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_integral() {
        let p = Parameters::constant(0.05);
        assert!((p.integral(0.0, 2.0) - 0.1).abs() < 1e-15);
        assert!((p.integral_square(0.0, 2.0) - 0.005).abs() < 1e-15);
        assert!((p.mean(0.5, 1.5) - 0.05).abs() < 1e-15);
        assert!((p.root_mean_square(0.5, 1.5) - 0.05).abs() < 1e-15);
    }

    #[test]
    fn test_constant_additivity() {
        let p = Parameters::from(0.2);
        let (t1, t2) = (0.37, 1.91);
        let split = p.integral(0.0, t1) + p.integral(t1, t2);
        assert!((split - p.integral(0.0, t2)).abs() < 1e-14);
        assert!((p.integral(0.0, t2) - 0.2 * t2).abs() < 1e-14);
    }

    #[test]
    fn test_piecewise_integrals() {
        let p = PiecewiseConstantParameter::new(vec![1.0, 2.0], vec![0.1, 0.3]).unwrap();
        let p = Parameters::new(p);

        assert!((p.integral(0.0, 1.0) - 0.1).abs() < 1e-14);
        assert!((p.integral(0.5, 1.5) - (0.05 + 0.15)).abs() < 1e-14);
        // flat beyond the last end time
        assert!((p.integral(2.0, 3.0) - 0.3).abs() < 1e-14);
        assert!((p.integral_square(0.0, 2.0) - (0.01 + 0.09)).abs() < 1e-14);

        let split = p.integral(0.0, 0.7) + p.integral(0.7, 1.3) + p.integral(1.3, 2.5);
        assert!((split - p.integral(0.0, 2.5)).abs() < 1e-14);
    }

    #[test]
    fn test_piecewise_rejects_bad_input() {
        assert!(PiecewiseConstantParameter::new(vec![1.0, 0.5], vec![0.1, 0.2]).is_err());
        assert!(matches!(
            PiecewiseConstantParameter::new(vec![1.0, 2.0], vec![0.1]),
            Err(McError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Parameters::constant(0.3);
        let copy = original.clone();
        drop(original);
        assert!((copy.integral(0.0, 1.0) - 0.3).abs() < 1e-15);
    }
}
