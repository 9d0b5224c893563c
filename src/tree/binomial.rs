// src/tree/binomial.rs
//! Equal-probability recombining binomial tree
//!
//! # Construction
//!
//! Node `k` of layer `i` (time `tᵢ = i·T/N`) sits at
//! ```text
//! S(i, j) = S₀ · exp(∫₀ᵗⁱ r - ∫₀ᵗⁱ d - ½σ²tᵢ + j·σ√(T/N)),   j = -i, -i+2, ..., i
//! ```
//! and up and down moves each carry probability ½. Backward induction discounts
//! one step at a time with `exp(-∫ r)` over that step.
//!
//! The node spots and step discounts depend only on the market, so the tree is
//! built on first use and reused for every product priced on it.

use super::products::TreeProduct;
use crate::error::{validation::*, McError, McResult};
use crate::parameters::Parameters;

#[derive(Debug, Clone, Copy, Default)]
struct TreeNode {
    spot: f64,
    value: f64,
}

#[derive(Debug, Clone)]
pub struct SimpleBinomialTree {
    spot: f64,
    r: Parameters,
    d: Parameters,
    volatility: f64,
    steps: usize,
    time: f64,
    tree: Vec<Vec<TreeNode>>,
    discounts: Vec<f64>,
}

impl SimpleBinomialTree {
    pub fn new(
        spot: f64,
        r: Parameters,
        d: Parameters,
        volatility: f64,
        steps: usize,
        time: f64,
    ) -> McResult<Self> {
        validate_positive("spot", spot)?;
        validate_non_negative("volatility", volatility)?;
        validate_steps(steps)?;
        validate_positive("time", time)?;

        Ok(Self {
            spot,
            r,
            d,
            volatility,
            steps,
            time,
            tree: Vec::new(),
            discounts: Vec::new(),
        })
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    fn is_built(&self) -> bool {
        !self.tree.is_empty()
    }

    fn build_tree(&mut self) {
        let steps = self.steps as f64;
        let initial_log_spot = self.spot.ln();
        let sd = self.volatility * (self.time / steps).sqrt();

        self.tree = (0..=self.steps)
            .map(|i| {
                let this_time = i as f64 * self.time / steps;
                let moved_log_spot = initial_log_spot + self.r.integral(0.0, this_time)
                    - self.d.integral(0.0, this_time)
                    - 0.5 * self.volatility * self.volatility * this_time;
                (0..=i)
                    .map(|k| {
                        let j = 2 * k as i64 - i as i64;
                        TreeNode {
                            spot: (moved_log_spot + j as f64 * sd).exp(),
                            value: 0.0,
                        }
                    })
                    .collect()
            })
            .collect();

        self.discounts = (0..self.steps)
            .map(|l| {
                let start = l as f64 * self.time / steps;
                let end = (l + 1) as f64 * self.time / steps;
                (-self.r.integral(start, end)).exp()
            })
            .collect();

        tracing::debug!(steps = self.steps, time = self.time, "binomial tree built");
    }

    /// Backward induction of `product` through the tree.
    ///
    /// # Errors
    ///
    /// `HorizonMismatch` if the product's final time is not the tree's horizon.
    pub fn price(&mut self, product: &dyn TreeProduct) -> McResult<f64> {
        let product_time = product.final_time();
        if (product_time - self.time).abs() > 1e-12 * self.time.max(1.0) {
            return Err(McError::HorizonMismatch {
                product_time,
                tree_time: self.time,
            });
        }
        if !self.is_built() {
            self.build_tree();
        }

        let steps = self.steps;
        for node in &mut self.tree[steps] {
            node.value = product.final_pay_off(node.spot);
        }

        for index in (0..steps).rev() {
            let this_time = index as f64 * self.time / steps as f64;
            let discount = self.discounts[index];
            let (current, next) = self.tree.split_at_mut(index + 1);
            let next_layer = &next[0];
            for (k, node) in current[index].iter_mut().enumerate() {
                let future_discounted_value =
                    0.5 * discount * (next_layer[k].value + next_layer[k + 1].value);
                node.value = product.pre_final_value(node.spot, this_time, future_discounted_value);
            }
        }

        Ok(self.tree[0][0].value)
    }
}
