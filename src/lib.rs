//! # exotic-mc: Monte Carlo Pricing of Path-Dependent Options
//!
//! Prices European, Asian and discretely monitored barrier options under the
//! lognormal model with deterministic, possibly time-varying rate, dividend yield
//! and volatility. A recombining binomial tree covers American exercise.
//!
//! ## Key Features
//!
//! - **Exact path stepping**: each step uses the integrated drift and variance of the
//!   term structures, so there is no discretisation bias between look-at times
//! - **Variance Reduction**: antithetic sampling as a generator decorator
//! - **Reproducible streams**: every generator can reset, reseed and skip ahead, which
//!   lets [`mc::config::price_parallel`] split one stream across rayon batches
//! - **Convergence reporting**: statistics snapshots at 2, 4, 8, ... paths
//!
//! ## Quick Start
//!
//! ```rust
//! use exotic_mc::mc::config::{price_path_dependent, MarketData, SimulationConfig};
//! use exotic_mc::mc::path_dependent::PathDependentAsian;
//! use exotic_mc::mc::payoffs::PayOff;
//!
//! // Monthly-averaged Asian call
//! let product = PathDependentAsian::equally_spaced(1.0, 12, PayOff::Call { strike: 100.0 })
//!     .expect("Valid product");
//! let market = MarketData::flat(100.0, 0.05, 0.0, 0.2);
//! let cfg = SimulationConfig {
//!     paths: 20_000,
//!     ..Default::default()
//! };
//!
//! let report = price_path_dependent(Box::new(product), &market, &cfg).expect("Valid inputs");
//! println!("Asian call: {:.4} ± {:.4}", report.price, report.standard_error);
//! ```
//!
//! ## Building Blocks
//!
//! The convenience pricers are thin wrappers over composable pieces:
//! [`rng::UniformGenerator`] implementations (optionally wrapped in
//! [`rng::AntiThetic`]), a [`mc::path_dependent::PathDependent`] product, the
//! [`mc::exotic_engine::ExoticBsEngine`] and a [`mc::statistics::StatisticsGatherer`].

pub mod analytics;
pub mod buffer;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod parameters;
pub mod rng;
pub mod tree;

pub use error::{McError, McResult};
