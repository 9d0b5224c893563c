// src/tree/products.rs
use crate::error::{validation::validate_positive, McResult};
use crate::mc::payoffs::PayOff;
use std::fmt;

/// Product priced by backward induction on a tree
pub trait TreeProduct: fmt::Debug + Send + Sync {
    /// Expiry; must coincide with the horizon of the tree used to price it
    fn final_time(&self) -> f64;

    fn final_pay_off(&self, spot: f64) -> f64;

    /// Value at an interior node given the discounted expected value of continuing
    fn pre_final_value(&self, spot: f64, time: f64, discounted_future_value: f64) -> f64;

    fn clone_box(&self) -> Box<dyn TreeProduct>;
}

impl Clone for Box<dyn TreeProduct> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeEuropean {
    final_time: f64,
    payoff: PayOff,
}

impl TreeEuropean {
    pub fn new(final_time: f64, payoff: PayOff) -> McResult<Self> {
        validate_positive("final_time", final_time)?;
        Ok(Self { final_time, payoff })
    }
}

impl TreeProduct for TreeEuropean {
    fn final_time(&self) -> f64 {
        self.final_time
    }

    fn final_pay_off(&self, spot: f64) -> f64 {
        self.payoff.evaluate(spot)
    }

    fn pre_final_value(&self, _spot: f64, _time: f64, discounted_future_value: f64) -> f64 {
        discounted_future_value
    }

    fn clone_box(&self) -> Box<dyn TreeProduct> {
        Box::new(*self)
    }
}

/// Exercisable at every node: `max(payoff(S), continuation)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeAmerican {
    final_time: f64,
    payoff: PayOff,
}

impl TreeAmerican {
    pub fn new(final_time: f64, payoff: PayOff) -> McResult<Self> {
        validate_positive("final_time", final_time)?;
        Ok(Self { final_time, payoff })
    }
}

impl TreeProduct for TreeAmerican {
    fn final_time(&self) -> f64 {
        self.final_time
    }

    fn final_pay_off(&self, spot: f64) -> f64 {
        self.payoff.evaluate(spot)
    }

    fn pre_final_value(&self, spot: f64, _time: f64, discounted_future_value: f64) -> f64 {
        self.payoff.evaluate(spot).max(discounted_future_value)
    }

    fn clone_box(&self) -> Box<dyn TreeProduct> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_values() {
        let put = PayOff::Put { strike: 100.0 };
        let european = TreeEuropean::new(1.0, put).unwrap();
        let american = TreeAmerican::new(1.0, put).unwrap();

        assert_eq!(european.pre_final_value(80.0, 0.5, 15.0), 15.0);
        assert_eq!(american.pre_final_value(80.0, 0.5, 15.0), 20.0);
        assert_eq!(american.pre_final_value(95.0, 0.5, 15.0), 15.0);
        assert_eq!(american.final_pay_off(90.0), 10.0);
    }

    #[test]
    fn test_rejects_non_positive_expiry() {
        assert!(TreeEuropean::new(0.0, PayOff::Call { strike: 1.0 }).is_err());
        assert!(TreeAmerican::new(-1.0, PayOff::Call { strike: 1.0 }).is_err());
    }

    #[test]
    fn test_boxed_clone() {
        let product: Box<dyn TreeProduct> =
            Box::new(TreeAmerican::new(2.0, PayOff::Call { strike: 1.0 }).unwrap());
        assert_eq!(product.clone().final_time(), 2.0);
    }
}
