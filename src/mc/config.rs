// src/mc/config.rs
//! Simulation configuration and one-call pricers
//!
//! [`SimulationConfig`] follows the usual pattern: plain public fields, a `Default`
//! with sensible values and a `validate()` called before any work starts.
//!
//! # Parallel Batches
//!
//! [`price_parallel`] splits the paths into a fixed number of batches. Batch `k`
//! runs on its own clone of the engine whose generator has been skipped past the
//! paths of batches `0..k`, so the batches consume disjoint, contiguous pieces of
//! one random stream. The merged result therefore depends on the batch count but not
//! on how many threads execute the batches.

use crate::error::{validation::*, McError, McResult};
use crate::mc::exotic_engine::{ExoticBsEngine, PathModel};
use crate::mc::path_dependent::PathDependent;
use crate::mc::statistics::{ConvergenceTable, StatisticsGatherer, StatisticsMoments};
use crate::parameters::Parameters;
use crate::rng::{AntiThetic, CounterGenerator, ParkMiller, StdGenerator, UniformGenerator};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    /// Park-Miller minimal standard LCG
    ParkMiller,
    /// splitmix64 counter generator
    Counter,
    /// `rand::rngs::StdRng`
    Std,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub paths: usize,
    pub seed: u64,
    pub antithetic: bool,
    pub generator: GeneratorKind,
    /// Record (mean, standard error, paths) snapshots at 2, 4, 8, ... paths
    pub convergence_table: bool,
    /// Number of independent batches for [`price_parallel`]
    pub batches: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            paths: 100_000,
            seed: 12345,
            antithetic: true,
            generator: GeneratorKind::ParkMiller,
            convergence_table: false,
            batches: num_cpus::get(),
        }
    }
}

impl SimulationConfig {
    /// Validate the simulation configuration
    pub fn validate(&self) -> McResult<()> {
        validate_paths(self.paths)?;
        if self.batches == 0 {
            return Err(McError::InvalidConfiguration {
                field: "batches".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Generator described by this configuration, antithetic-wrapped when requested
    pub fn build_generator(&self, dimensionality: usize) -> Box<dyn UniformGenerator> {
        let inner: Box<dyn UniformGenerator> = match self.generator {
            GeneratorKind::ParkMiller => Box::new(ParkMiller::new(dimensionality, self.seed)),
            GeneratorKind::Counter => Box::new(CounterGenerator::new(dimensionality, self.seed)),
            GeneratorKind::Std => Box::new(StdGenerator::new(dimensionality, self.seed)),
        };
        if self.antithetic {
            Box::new(AntiThetic::new(inner))
        } else {
            inner
        }
    }
}

/// Spot plus rate, dividend-yield and volatility term structures
#[derive(Debug, Clone)]
pub struct MarketData {
    pub spot: f64,
    pub rate: Parameters,
    pub dividend: Parameters,
    pub volatility: Parameters,
}

impl MarketData {
    /// Constant rate, dividend yield and volatility
    pub fn flat(spot: f64, rate: f64, dividend: f64, volatility: f64) -> Self {
        Self {
            spot,
            rate: Parameters::constant(rate),
            dividend: Parameters::constant(dividend),
            volatility: Parameters::constant(volatility),
        }
    }

    pub fn validate(&self) -> McResult<()> {
        validate_positive("spot", self.spot)?;
        validate_finite("spot", self.spot)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub price: f64,
    pub standard_error: f64,
    pub paths: usize,
    /// Rows of `[mean, standard_error, paths]`; empty unless requested
    pub convergence: Vec<Vec<f64>>,
}

fn build_engine(
    product: Box<dyn PathDependent>,
    market: &MarketData,
    cfg: &SimulationConfig,
) -> McResult<ExoticBsEngine> {
    let generator = cfg.build_generator(product.look_at_times().len());
    ExoticBsEngine::new(
        product,
        &market.rate,
        &market.dividend,
        &market.volatility,
        generator,
        market.spot,
    )
}

fn finish(
    price: f64,
    standard_error: f64,
    paths: usize,
    convergence: Vec<Vec<f64>>,
) -> McResult<SimulationReport> {
    if !price.is_finite() {
        return Err(McError::NumericalInstability {
            method: "Monte Carlo".to_string(),
            reason: format!("Price estimate is not finite: {}", price),
        });
    }
    if !standard_error.is_finite() {
        return Err(McError::NumericalInstability {
            method: "Monte Carlo".to_string(),
            reason: format!("Standard error is not finite: {}", standard_error),
        });
    }
    tracing::info!(price, standard_error, paths, "monte carlo pricing finished");
    Ok(SimulationReport {
        price,
        standard_error,
        paths,
        convergence,
    })
}

/// Price a path-dependent product on one thread.
///
/// # Errors
///
/// Returns `McError` for invalid configuration or market data, malformed products
/// and non-finite results.
pub fn price_path_dependent(
    product: Box<dyn PathDependent>,
    market: &MarketData,
    cfg: &SimulationConfig,
) -> McResult<SimulationReport> {
    cfg.validate()?;
    market.validate()?;
    let mut engine = build_engine(product, market, cfg)?;

    let mut gatherer: Box<dyn StatisticsGatherer> = if cfg.convergence_table {
        Box::new(ConvergenceTable::new(StatisticsMoments::new()))
    } else {
        Box::new(StatisticsMoments::new())
    };
    engine.do_simulation(gatherer.as_mut(), cfg.paths as u64)?;

    let rows = gatherer.results_so_far();
    let last = rows.last().ok_or_else(|| McError::EmptyInput {
        operation: "simulation results".to_string(),
    })?;
    let (price, standard_error) = (last[0], last[1]);
    let convergence = if cfg.convergence_table { rows } else { Vec::new() };

    finish(price, standard_error, cfg.paths, convergence)
}

/// Price a path-dependent product across `cfg.batches` independent batches run on
/// the rayon thread pool. The convergence table is not collected in this mode.
///
/// The batch count is capped at the number of paths so no batch is empty.
pub fn price_parallel(
    product: Box<dyn PathDependent>,
    market: &MarketData,
    cfg: &SimulationConfig,
) -> McResult<SimulationReport> {
    cfg.validate()?;
    market.validate()?;
    let template = build_engine(product, market, cfg)?;

    let batch_count = cfg.batches.min(cfg.paths);
    let base = cfg.paths / batch_count;
    let remainder = cfg.paths % batch_count;
    let mut offset = 0u64;
    let mut batches = Vec::with_capacity(batch_count);
    for k in 0..batch_count {
        let size = (base + usize::from(k < remainder)) as u64;
        let mut engine = template.clone();
        engine.model_mut().skip_paths(offset);
        batches.push((engine, size));
        offset += size;
    }
    tracing::debug!(batches = batch_count, paths = cfg.paths, "dispatching batches");

    let results: Vec<StatisticsMoments> = batches
        .into_par_iter()
        .map(|(mut engine, size)| -> McResult<StatisticsMoments> {
            let mut gatherer = StatisticsMoments::new();
            engine.do_simulation(&mut gatherer, size)?;
            Ok(gatherer)
        })
        .collect::<McResult<Vec<_>>>()?;

    let mut total = StatisticsMoments::new();
    for batch in &results {
        total.merge(batch);
    }

    let price = total.mean().unwrap_or(f64::NAN);
    let standard_error = total.standard_error().unwrap_or(0.0);
    finish(price, standard_error, cfg.paths, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::path_dependent::PathDependentAsian;
    use crate::mc::payoffs::PayOff;

    fn asian_call() -> Box<dyn PathDependent> {
        Box::new(PathDependentAsian::equally_spaced(1.0, 4, PayOff::Call { strike: 100.0 }).unwrap())
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let cfg = SimulationConfig {
            paths: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = SimulationConfig {
            batches: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_invalid_market() {
        let cfg = SimulationConfig {
            paths: 10,
            batches: 1,
            ..Default::default()
        };
        let market = MarketData::flat(-1.0, 0.05, 0.0, 0.2);
        assert!(price_path_dependent(asian_call(), &market, &cfg).is_err());
    }

    #[test]
    fn test_convergence_rows_reported() {
        let cfg = SimulationConfig {
            paths: 1_000,
            batches: 1,
            convergence_table: true,
            ..Default::default()
        };
        let market = MarketData::flat(100.0, 0.05, 0.0, 0.2);
        let report = price_path_dependent(asian_call(), &market, &cfg).unwrap();

        // 2, 4, ..., 512 plus the live row at 1000
        assert_eq!(report.convergence.len(), 10);
        let last = report.convergence.last().unwrap();
        assert_eq!(last[2], 1_000.0);
        assert_eq!(last[0], report.price);
    }

    #[test]
    fn test_parallel_is_independent_of_thread_count() {
        let cfg = SimulationConfig {
            paths: 4_001,
            batches: 7,
            generator: GeneratorKind::Counter,
            ..Default::default()
        };
        let market = MarketData::flat(100.0, 0.05, 0.0, 0.2);

        let single = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap()
            .install(|| price_parallel(asian_call(), &market, &cfg).unwrap());
        let many = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap()
            .install(|| price_parallel(asian_call(), &market, &cfg).unwrap());

        assert_eq!(single, many);
    }

    #[test]
    fn test_single_batch_matches_sequential() {
        let cfg = SimulationConfig {
            paths: 2_000,
            batches: 1,
            ..Default::default()
        };
        let market = MarketData::flat(100.0, 0.05, 0.0, 0.2);
        let sequential = price_path_dependent(asian_call(), &market, &cfg).unwrap();
        let parallel = price_parallel(asian_call(), &market, &cfg).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_batches_cover_one_stream() {
        // with a plain generator the batches replay the sequential stream exactly,
        // so only the merge order can move the mean
        let cfg = SimulationConfig {
            paths: 3_000,
            batches: 3,
            antithetic: false,
            ..Default::default()
        };
        let market = MarketData::flat(100.0, 0.05, 0.0, 0.2);
        let sequential = price_path_dependent(asian_call(), &market, &SimulationConfig {
            batches: 1,
            ..cfg.clone()
        })
        .unwrap();
        let parallel = price_parallel(asian_call(), &market, &cfg).unwrap();
        assert!((sequential.price - parallel.price).abs() < 1e-10);
        assert!((sequential.standard_error - parallel.standard_error).abs() < 1e-10);
    }

    #[test]
    fn test_more_batches_than_paths() {
        let cfg = SimulationConfig {
            paths: 4,
            batches: 8,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());

        let market = MarketData::flat(100.0, 0.05, 0.0, 0.2);
        let sequential = price_path_dependent(asian_call(), &market, &cfg).unwrap();
        assert_eq!(sequential.paths, 4);

        // capped at one path per batch, which replays the sequential stream
        let parallel = price_parallel(asian_call(), &market, &cfg).unwrap();
        assert_eq!(parallel.paths, 4);
        assert!((sequential.price - parallel.price).abs() < 1e-10);
    }

    #[test]
    fn test_antithetic_batches_cover_one_stream() {
        // odd batch sizes start later batches halfway through an antithetic pair
        let cfg = SimulationConfig {
            paths: 3_001,
            batches: 3,
            antithetic: true,
            ..Default::default()
        };
        let market = MarketData::flat(100.0, 0.05, 0.0, 0.2);
        let sequential = price_path_dependent(asian_call(), &market, &SimulationConfig {
            batches: 1,
            ..cfg.clone()
        })
        .unwrap();
        let parallel = price_parallel(asian_call(), &market, &cfg).unwrap();
        assert!((sequential.price - parallel.price).abs() < 1e-10);
        assert!((sequential.standard_error - parallel.standard_error).abs() < 1e-10);
    }
}
