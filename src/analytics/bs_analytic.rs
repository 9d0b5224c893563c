// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas with a continuous dividend yield
//!
//! # Mathematical Foundation
//!
//! Under the risk-neutral measure the underlying follows:
//! ```text
//! dS_t = (r - d) S_t dt + σ S_t dW_t
//! ```
//!
//! and every formula below shares
//! ```text
//! d₁ = [ln(S/K) + (r - d + σ²/2)T] / (σ√T)
//! d₂ = d₁ - σ√T
//! ```
//!
//! These are the reference values the Monte Carlo and tree pricers are checked
//! against.

use crate::math_utils::{norm_cdf, norm_pdf};

fn d1_d2(s: f64, k: f64, r: f64, d: f64, sigma: f64, t: f64) -> (f64, f64) {
    let standard_deviation = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r - d + 0.5 * sigma * sigma) * t) / standard_deviation;
    (d1, d1 - standard_deviation)
}

/// Black-Scholes European call option price
///
/// # Formula
/// ```text
/// C = S e^(-dT) Φ(d₁) - K e^(-rT) Φ(d₂)
/// ```
///
/// # Parameters
/// - `s`: Current spot
/// - `k`: Strike
/// - `r`: Risk-free rate
/// - `d`: Dividend yield
/// - `sigma`: Volatility
/// - `t`: Time to expiry
pub fn bs_call_price(s: f64, k: f64, r: f64, d: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, d, sigma, t);
    s * (-d * t).exp() * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2)
}

/// Black-Scholes European put option price
///
/// # Formula
/// ```text
/// P = K e^(-rT) Φ(-d₂) - S e^(-dT) Φ(-d₁)
/// ```
pub fn bs_put_price(s: f64, k: f64, r: f64, d: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, d, sigma, t);
    k * (-r * t).exp() * norm_cdf(-d2) - s * (-d * t).exp() * norm_cdf(-d1)
}

/// Cash-or-nothing digital call paying 1 when `S_T > K`
///
/// # Formula
/// ```text
/// DC = e^(-rT) Φ(d₂)
/// ```
pub fn bs_digital_call(s: f64, k: f64, r: f64, d: f64, sigma: f64, t: f64) -> f64 {
    let (_, d2) = d1_d2(s, k, r, d, sigma, t);
    (-r * t).exp() * norm_cdf(d2)
}

/// Cash-or-nothing digital put paying 1 when `S_T < K`
pub fn bs_digital_put(s: f64, k: f64, r: f64, d: f64, sigma: f64, t: f64) -> f64 {
    let (_, d2) = d1_d2(s, k, r, d, sigma, t);
    (-r * t).exp() * norm_cdf(-d2)
}

/// Black-Scholes Delta (∂C/∂S) for a European call
///
/// # Formula
/// ```text
/// Δ = e^(-dT) Φ(d₁)
/// ```
pub fn bs_call_delta(s: f64, k: f64, r: f64, d: f64, sigma: f64, t: f64) -> f64 {
    let (d1, _) = d1_d2(s, k, r, d, sigma, t);
    (-d * t).exp() * norm_cdf(d1)
}

/// Black-Scholes Vega (∂C/∂σ), identical for calls and puts
///
/// # Formula
/// ```text
/// ν = S e^(-dT) φ(d₁) √T
/// ```
pub fn bs_call_vega(s: f64, k: f64, r: f64, d: f64, sigma: f64, t: f64) -> f64 {
    let (d1, _) = d1_d2(s, k, r, d, sigma, t);
    s * (-d * t).exp() * norm_pdf(d1) * t.sqrt()
}
