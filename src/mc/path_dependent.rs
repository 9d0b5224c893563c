//! Path-Dependent Products
//!
//! A path-dependent product watches the spot at a fixed, increasing set of look-at
//! times and turns the observed values into a handful of cash flows. Each
//! [`CashFlow`] refers to its payment date by index into
//! [`PathDependent::possible_cash_flow_times`], so the engine can discount with a
//! table it builds once.
//!
//! Implementations are pure functions of the spot path: no per-path state is kept.

use crate::error::{validation::*, McError, McResult};
use crate::mc::payoffs::PayOff;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CashFlow {
    pub time_index: usize,
    pub amount: f64,
}

impl CashFlow {
    pub fn new(time_index: usize, amount: f64) -> Self {
        Self { time_index, amount }
    }
}

pub trait PathDependent: fmt::Debug + Send + Sync {
    fn look_at_times(&self) -> &[f64];

    /// Upper bound on the number of flows [`cash_flows`](Self::cash_flows) writes
    fn max_number_of_cash_flows(&self) -> usize;

    fn possible_cash_flow_times(&self) -> Vec<f64>;

    /// Write this path's flows into the front of `generated_flows` and return how many.
    ///
    /// `spot_values` must have one entry per look-at time and `generated_flows` room
    /// for [`max_number_of_cash_flows`](Self::max_number_of_cash_flows) entries.
    fn cash_flows(&self, spot_values: &[f64], generated_flows: &mut [CashFlow])
        -> McResult<usize>;

    fn clone_box(&self) -> Box<dyn PathDependent>;
}

impl Clone for Box<dyn PathDependent> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

fn check_shapes(
    product: &dyn PathDependent,
    spot_values: &[f64],
    generated_flows: &[CashFlow],
) -> McResult<()> {
    let expected = product.look_at_times().len();
    if spot_values.len() != expected {
        return Err(McError::dimension("spot path", expected, spot_values.len()));
    }
    let needed = product.max_number_of_cash_flows();
    if generated_flows.len() < needed {
        return Err(McError::dimension(
            "cash-flow buffer",
            needed,
            generated_flows.len(),
        ));
    }
    Ok(())
}

fn validate_look_at_times(look_at_times: &[f64]) -> McResult<()> {
    validate_increasing("look_at_times", look_at_times)?;
    validate_non_negative("look_at_times[0]", look_at_times[0])
}

/// Arithmetic-average Asian option
///
/// # Payoff
/// ```text
/// A = (1/n) ∑ S(tᵢ)
/// flow = payoff(A), paid at the delivery time
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PathDependentAsian {
    look_at_times: Vec<f64>,
    delivery_time: f64,
    payoff: PayOff,
}

impl PathDependentAsian {
    pub fn new(look_at_times: Vec<f64>, delivery_time: f64, payoff: PayOff) -> McResult<Self> {
        validate_look_at_times(&look_at_times)?;
        validate_finite("delivery_time", delivery_time)?;
        Ok(Self {
            look_at_times,
            delivery_time,
            payoff,
        })
    }

    /// Single observation at expiry: the average is the terminal spot.
    pub fn european(expiry: f64, payoff: PayOff) -> McResult<Self> {
        validate_positive("expiry", expiry)?;
        Self::new(vec![expiry], expiry, payoff)
    }

    /// `number_of_dates` equally spaced observations ending at `expiry`, delivered at expiry
    pub fn equally_spaced(expiry: f64, number_of_dates: usize, payoff: PayOff) -> McResult<Self> {
        validate_positive("expiry", expiry)?;
        validate_steps(number_of_dates)?;
        let times = (1..=number_of_dates)
            .map(|i| i as f64 * expiry / number_of_dates as f64)
            .collect();
        Self::new(times, expiry, payoff)
    }

    pub fn delivery_time(&self) -> f64 {
        self.delivery_time
    }
}

impl PathDependent for PathDependentAsian {
    fn look_at_times(&self) -> &[f64] {
        &self.look_at_times
    }

    fn max_number_of_cash_flows(&self) -> usize {
        1
    }

    fn possible_cash_flow_times(&self) -> Vec<f64> {
        vec![self.delivery_time]
    }

    fn cash_flows(
        &self,
        spot_values: &[f64],
        generated_flows: &mut [CashFlow],
    ) -> McResult<usize> {
        check_shapes(self, spot_values, generated_flows)?;

        let mean = spot_values.iter().sum::<f64>() / spot_values.len() as f64;
        generated_flows[0] = CashFlow::new(0, self.payoff.evaluate(mean));
        Ok(1)
    }

    fn clone_box(&self) -> Box<dyn PathDependent> {
        Box::new(self.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierDirection {
    /// Knocked out once an observed spot is at or above the barrier
    UpAndOut,
    /// Knocked out once an observed spot is at or below the barrier
    DownAndOut,
}

/// Knock-out option monitored at the look-at times only
///
/// # Cash Flows
///
/// - Alive at the last observation: `payoff(S(t_last))` paid at the delivery time
///   (cash-flow time index 0)
/// - Knocked out at observation `i`: the rebate, paid at `tᵢ` (index `1 + i`); no
///   flow at all when the rebate is zero
#[derive(Debug, Clone, PartialEq)]
pub struct PathDependentDiscreteBarrier {
    look_at_times: Vec<f64>,
    delivery_time: f64,
    payoff: PayOff,
    barrier: f64,
    direction: BarrierDirection,
    rebate: f64,
}

impl PathDependentDiscreteBarrier {
    pub fn new(
        look_at_times: Vec<f64>,
        delivery_time: f64,
        payoff: PayOff,
        barrier: f64,
        direction: BarrierDirection,
    ) -> McResult<Self> {
        validate_look_at_times(&look_at_times)?;
        validate_finite("delivery_time", delivery_time)?;
        validate_positive("barrier", barrier)?;
        Ok(Self {
            look_at_times,
            delivery_time,
            payoff,
            barrier,
            direction,
            rebate: 0.0,
        })
    }

    pub fn with_rebate(mut self, rebate: f64) -> McResult<Self> {
        validate_finite("rebate", rebate)?;
        self.rebate = rebate;
        Ok(self)
    }

    fn breached(&self, spot: f64) -> bool {
        match self.direction {
            BarrierDirection::UpAndOut => spot >= self.barrier,
            BarrierDirection::DownAndOut => spot <= self.barrier,
        }
    }
}

impl PathDependent for PathDependentDiscreteBarrier {
    fn look_at_times(&self) -> &[f64] {
        &self.look_at_times
    }

    fn max_number_of_cash_flows(&self) -> usize {
        1
    }

    fn possible_cash_flow_times(&self) -> Vec<f64> {
        std::iter::once(self.delivery_time)
            .chain(self.look_at_times.iter().copied())
            .collect()
    }

    fn cash_flows(
        &self,
        spot_values: &[f64],
        generated_flows: &mut [CashFlow],
    ) -> McResult<usize> {
        check_shapes(self, spot_values, generated_flows)?;

        if let Some(knock_out) = spot_values.iter().position(|&s| self.breached(s)) {
            if self.rebate == 0.0 {
                return Ok(0);
            }
            generated_flows[0] = CashFlow::new(1 + knock_out, self.rebate);
            return Ok(1);
        }

        let terminal = spot_values[spot_values.len() - 1];
        generated_flows[0] = CashFlow::new(0, self.payoff.evaluate(terminal));
        Ok(1)
    }

    fn clone_box(&self) -> Box<dyn PathDependent> {
        Box::new(self.clone())
    }
}
