// src/mc/exotic_engine.rs
//! Path-Dependent Monte Carlo Engine
//!
//! # Math Framework
//!
//! Under the risk-neutral lognormal model with deterministic, possibly time-varying
//! rate `r(t)`, dividend yield `d(t)` and volatility `σ(t)`, the log-spot increment
//! between two look-at times is exactly Gaussian:
//! ```text
//! ln S(tⱼ) - ln S(tⱼ₋₁) = ∫ r - ∫ d - ½ ∫ σ²  +  √(∫ σ²) · Z,   Z ~ N(0,1)
//! ```
//! with all integrals over `[tⱼ₋₁, tⱼ]` and `t₋₁ = 0`. The per-step drifts and
//! standard deviations are computed once when the engine is built.
//!
//! # Structure
//!
//! [`ExoticEngine`] owns the product, the discount factors `exp(-∫₀ᵗ r)` for each
//! possible cash-flow time and a [`PathModel`] that produces spot paths. Variance
//! reduction is entirely the generator's business: wrap it in
//! [`AntiThetic`](crate::rng::AntiThetic) to get antithetic sampling.

use crate::buffer::NumericBuffer;
use crate::error::{validation::validate_positive, McError, McResult};
use crate::mc::path_dependent::{CashFlow, PathDependent};
use crate::mc::statistics::StatisticsGatherer;
use crate::parameters::Parameters;
use crate::rng::UniformGenerator;
use std::fmt;

/// Produces one spot path per call, observed at the product's look-at times
pub trait PathModel: fmt::Debug + Send {
    fn number_of_times(&self) -> usize;

    fn get_one_path(&mut self, spot_values: &mut [f64]);

    /// Move the underlying random stream forward by `number_of_paths` paths
    fn skip_paths(&mut self, number_of_paths: u64);
}

#[derive(Debug, Clone)]
pub struct ExoticEngine<M> {
    product: Box<dyn PathDependent>,
    discounts: NumericBuffer,
    these_cash_flows: Vec<CashFlow>,
    model: M,
}

impl<M: PathModel> ExoticEngine<M> {
    pub fn with_model(product: Box<dyn PathDependent>, r: &Parameters, model: M) -> McResult<Self> {
        let times = product.look_at_times().len();
        if model.number_of_times() != times {
            return Err(McError::dimension(
                "path model look-at times",
                times,
                model.number_of_times(),
            ));
        }

        let discounts: NumericBuffer = product
            .possible_cash_flow_times()
            .into_iter()
            .map(|t| (-r.integral(0.0, t)).exp())
            .collect::<Vec<f64>>()
            .into();
        let these_cash_flows = vec![CashFlow::default(); product.max_number_of_cash_flows()];

        tracing::debug!(
            look_at_times = times,
            cash_flow_times = discounts.size(),
            max_flows = these_cash_flows.len(),
            "exotic engine built"
        );

        Ok(Self {
            product,
            discounts,
            these_cash_flows,
            model,
        })
    }

    pub fn product(&self) -> &dyn PathDependent {
        self.product.as_ref()
    }

    /// Discount factor for each entry of the product's possible cash-flow times
    pub fn discounts(&self) -> &[f64] {
        &self.discounts
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn get_one_path(&mut self, spot_values: &mut [f64]) {
        self.model.get_one_path(spot_values);
    }

    /// Discounted value of the product's cash flows along one path
    pub fn do_one_path(&mut self, spot_values: &[f64]) -> McResult<f64> {
        let number_of_flows = self
            .product
            .cash_flows(spot_values, &mut self.these_cash_flows)?;

        let flows = self.these_cash_flows.get(..number_of_flows).ok_or_else(|| {
            McError::dimension("cash flows", self.these_cash_flows.len(), number_of_flows)
        })?;

        let mut value = 0.0;
        for flow in flows {
            let discount = self.discounts.get(flow.time_index).ok_or_else(|| {
                McError::dimension("cash-flow time index", self.discounts.size(), flow.time_index)
            })?;
            value += flow.amount * discount;
        }
        Ok(value)
    }

    /// Simulate `number_of_paths` paths, dumping each discounted value into `gatherer`.
    pub fn do_simulation(
        &mut self,
        gatherer: &mut dyn StatisticsGatherer,
        number_of_paths: u64,
    ) -> McResult<()> {
        let mut spot_values = NumericBuffer::with_size(self.product.look_at_times().len());

        tracing::debug!(paths = number_of_paths, "starting simulation");
        for _ in 0..number_of_paths {
            self.get_one_path(&mut spot_values);
            let value = self.do_one_path(&spot_values)?;
            gatherer.dump_one_result(value);
        }
        tracing::debug!(paths = number_of_paths, "simulation finished");

        Ok(())
    }
}

/// Exact lognormal path generation from term-structure integrals
#[derive(Debug, Clone)]
pub struct BlackScholesPathModel {
    generator: Box<dyn UniformGenerator>,
    drifts: NumericBuffer,
    standard_deviations: NumericBuffer,
    log_spot: f64,
    variates: NumericBuffer,
}

impl BlackScholesPathModel {
    /// Precompute the per-step schedule for `look_at_times` and resize the generator
    /// to one variate per step.
    pub fn new(
        look_at_times: &[f64],
        r: &Parameters,
        d: &Parameters,
        vol: &Parameters,
        mut generator: Box<dyn UniformGenerator>,
        spot: f64,
    ) -> McResult<Self> {
        validate_positive("spot", spot)?;
        let number_of_times = look_at_times.len();
        generator.reset_dimensionality(number_of_times);

        let mut drifts = NumericBuffer::with_size(number_of_times);
        let mut standard_deviations = NumericBuffer::with_size(number_of_times);

        let mut previous = 0.0;
        for (j, &time) in look_at_times.iter().enumerate() {
            let variance = vol.integral_square(previous, time);
            drifts[j] = r.integral(previous, time) - d.integral(previous, time) - 0.5 * variance;
            standard_deviations[j] = variance.max(0.0).sqrt();
            previous = time;
        }

        Ok(Self {
            generator,
            drifts,
            standard_deviations,
            log_spot: spot.ln(),
            variates: NumericBuffer::with_size(number_of_times),
        })
    }

    pub fn drifts(&self) -> &[f64] {
        &self.drifts
    }

    pub fn standard_deviations(&self) -> &[f64] {
        &self.standard_deviations
    }

    pub fn generator_mut(&mut self) -> &mut dyn UniformGenerator {
        self.generator.as_mut()
    }
}

impl PathModel for BlackScholesPathModel {
    fn number_of_times(&self) -> usize {
        self.drifts.size()
    }

    fn get_one_path(&mut self, spot_values: &mut [f64]) {
        self.generator.get_gaussians(&mut self.variates);

        let mut current_log_spot = self.log_spot;
        for j in 0..self.drifts.size() {
            current_log_spot += self.drifts[j];
            current_log_spot += self.standard_deviations[j] * self.variates[j];
            spot_values[j] = current_log_spot.exp();
        }
    }

    fn skip_paths(&mut self, number_of_paths: u64) {
        self.generator.skip(number_of_paths);
    }
}

/// Path-dependent engine under term-structure Black-Scholes dynamics
pub type ExoticBsEngine = ExoticEngine<BlackScholesPathModel>;

impl ExoticEngine<BlackScholesPathModel> {
    pub fn new(
        product: Box<dyn PathDependent>,
        r: &Parameters,
        d: &Parameters,
        vol: &Parameters,
        generator: Box<dyn UniformGenerator>,
        spot: f64,
    ) -> McResult<Self> {
        let model =
            BlackScholesPathModel::new(product.look_at_times(), r, d, vol, generator, spot)?;
        Self::with_model(product, r, model)
    }
}
