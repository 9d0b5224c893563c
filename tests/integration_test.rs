// tests/integration_test.rs
use exotic_mc::analytics::bs_analytic;
use exotic_mc::mc::config::{price_parallel, price_path_dependent, MarketData, SimulationConfig};
use exotic_mc::mc::exotic_engine::ExoticBsEngine;
use exotic_mc::mc::path_dependent::{
    BarrierDirection, PathDependent, PathDependentAsian, PathDependentDiscreteBarrier,
};
use exotic_mc::mc::payoffs::{PayOff, PayoffRegistry};
use exotic_mc::mc::statistics::{StatisticsGatherer, StatisticsMean, StatisticsMoments};
use exotic_mc::mc::vanilla::{simple_monte_carlo, VanillaOption};
use exotic_mc::parameters::Parameters;
use exotic_mc::rng::{AntiThetic, ParkMiller};

const SPOT: f64 = 100.0;
const STRIKE: f64 = 100.0;
const RATE: f64 = 0.05;
const VOL: f64 = 0.2;
const EXPIRY: f64 = 1.0;

fn run_engine(product: Box<dyn PathDependent>, vol: f64, paths: u64) -> StatisticsMoments {
    let dimensionality = product.look_at_times().len();
    let generator = AntiThetic::new(Box::new(ParkMiller::new(dimensionality, 1)));
    let mut engine = ExoticBsEngine::new(
        product,
        &Parameters::constant(RATE),
        &Parameters::constant(0.0),
        &Parameters::constant(vol),
        Box::new(generator),
        SPOT,
    )
    .expect("Valid engine");

    let mut gatherer = StatisticsMoments::new();
    engine
        .do_simulation(&mut gatherer, paths)
        .expect("Simulation runs");
    gatherer
}

#[test]
fn test_european_call_engine_vs_analytic() {
    let payoff = PayoffRegistry::with_defaults()
        .try_create("call", &[STRIKE])
        .expect("Registered payoff");
    let product = PathDependentAsian::european(EXPIRY, payoff).expect("Valid product");

    let gatherer = run_engine(Box::new(product), VOL, 100_000);
    let mc_price = gatherer.mean().unwrap();
    let analytic_price = bs_analytic::bs_call_price(SPOT, STRIKE, RATE, 0.0, VOL, EXPIRY);

    println!("\nMC Price: {}", mc_price);
    println!("Analytic Price: {}", analytic_price);
    println!("Standard Error: {}", gatherer.standard_error().unwrap());

    let rel_error = (mc_price - analytic_price).abs() / analytic_price;
    assert!(rel_error < 0.01, "Relative error exceeds 1%: {}", rel_error);
}

#[test]
fn test_vanilla_pricer_vs_analytic() {
    let option = VanillaOption::new(PayOff::Put { strike: STRIKE }, EXPIRY).unwrap();
    let mut gatherer = StatisticsMean::new();
    let mut generator = AntiThetic::new(Box::new(ParkMiller::new(1, 7)));

    simple_monte_carlo(
        &option,
        SPOT,
        &Parameters::constant(VOL),
        &Parameters::constant(RATE),
        100_000,
        &mut gatherer,
        &mut generator,
    )
    .expect("Valid inputs");

    let mc_price = gatherer.results_so_far()[0][0];
    let analytic_price = bs_analytic::bs_put_price(SPOT, STRIKE, RATE, 0.0, VOL, EXPIRY);
    let rel_error = (mc_price - analytic_price).abs() / analytic_price;
    println!("Vanilla put MC {} vs analytic {}", mc_price, analytic_price);
    assert!(rel_error < 0.02, "Relative error exceeds 2%: {}", rel_error);
}

#[test]
fn test_asian_cheaper_than_european() {
    let call = PayOff::Call { strike: STRIKE };
    let asian = PathDependentAsian::equally_spaced(EXPIRY, 12, call).unwrap();
    let european = PathDependentAsian::european(EXPIRY, call).unwrap();

    let asian_price = run_engine(Box::new(asian), VOL, 50_000).mean().unwrap();
    let european_price = run_engine(Box::new(european), VOL, 50_000).mean().unwrap();

    println!("Asian: {}, European: {}", asian_price, european_price);
    assert!(asian_price > 0.0);
    assert!(asian_price < european_price);
}

#[test]
fn test_quarterly_asian_cheaper_than_european() {
    let call = PayOff::Call { strike: STRIKE };
    let asian = PathDependentAsian::equally_spaced(EXPIRY, 4, call).unwrap();
    let european = PathDependentAsian::european(EXPIRY, call).unwrap();

    let asian_price = run_engine(Box::new(asian), VOL, 100_000).mean().unwrap();
    let european_price = run_engine(Box::new(european), VOL, 100_000).mean().unwrap();

    println!("Asian (4 dates): {}, European: {}", asian_price, european_price);
    assert!(asian_price > 0.0);
    assert!(asian_price < european_price);
}

#[test]
fn test_knock_out_cheaper_than_vanilla() {
    let call = PayOff::Call { strike: STRIKE };
    let times: Vec<f64> = (1..=12).map(|i| i as f64 / 12.0).collect();
    let barrier = PathDependentDiscreteBarrier::new(
        times,
        EXPIRY,
        call,
        130.0,
        BarrierDirection::UpAndOut,
    )
    .unwrap();

    let barrier_price = run_engine(Box::new(barrier), VOL, 50_000).mean().unwrap();
    let vanilla_price = bs_analytic::bs_call_price(SPOT, STRIKE, RATE, 0.0, VOL, EXPIRY);
    assert!(barrier_price > 0.0);
    assert!(barrier_price < vanilla_price - 1.0);
}

#[test]
fn test_zero_volatility_is_exact() {
    let times = vec![0.25, 0.5, 0.75, 1.0];
    let product = PathDependentAsian::new(times.clone(), 1.0, PayOff::Call { strike: 95.0 }).unwrap();

    let gatherer = run_engine(Box::new(product), 0.0, 1_000);

    let average = times.iter().map(|t| SPOT * (RATE * t).exp()).sum::<f64>() / times.len() as f64;
    let expected = (-RATE).exp() * (average - 95.0);
    assert!((gatherer.mean().unwrap() - expected).abs() < 1e-10);
    assert_eq!(gatherer.standard_error(), Some(0.0));
}

#[test]
fn test_parallel_pricer_vs_analytic() {
    let product = PathDependentAsian::european(EXPIRY, PayOff::Call { strike: STRIKE }).unwrap();
    let market = MarketData::flat(SPOT, RATE, 0.02, VOL);
    let cfg = SimulationConfig {
        paths: 100_000,
        batches: 8,
        ..Default::default()
    };

    let report = price_parallel(Box::new(product), &market, &cfg).expect("Valid inputs");
    let analytic_price = bs_analytic::bs_call_price(SPOT, STRIKE, RATE, 0.02, VOL, EXPIRY);
    let rel_error = (report.price - analytic_price).abs() / analytic_price;
    println!("Parallel MC {} ± {} vs analytic {}", report.price, report.standard_error, analytic_price);
    assert!(rel_error < 0.01, "Relative error exceeds 1%: {}", rel_error);
    assert_eq!(report.paths, 100_000);
}

#[test]
fn test_digital_through_registry() {
    let payoff = PayoffRegistry::with_defaults()
        .try_create("double_digital", &[90.0, 110.0])
        .unwrap();
    let product = PathDependentAsian::european(EXPIRY, payoff).unwrap();
    let market = MarketData::flat(SPOT, RATE, 0.0, VOL);
    let cfg = SimulationConfig {
        paths: 100_000,
        batches: 1,
        ..Default::default()
    };

    let report = price_path_dependent(Box::new(product), &market, &cfg).unwrap();
    let analytic = bs_analytic::bs_digital_call(SPOT, 90.0, RATE, 0.0, VOL, EXPIRY)
        - bs_analytic::bs_digital_call(SPOT, 110.0, RATE, 0.0, VOL, EXPIRY);
    assert!(
        (report.price - analytic).abs() < 4.0 * report.standard_error + 1e-3,
        "MC {} vs analytic {}",
        report.price,
        analytic
    );
}
