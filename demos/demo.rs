// demos/demo.rs
use exotic_mc::analytics::bs_analytic;
use exotic_mc::math_utils::Timer;
use exotic_mc::mc::config::{price_parallel, price_path_dependent, MarketData, SimulationConfig};
use exotic_mc::mc::path_dependent::{
    BarrierDirection, PathDependentAsian, PathDependentDiscreteBarrier,
};
use exotic_mc::mc::payoffs::{PayOff, PayoffRegistry};
use exotic_mc::parameters::{Parameters, PiecewiseConstantParameter};
use exotic_mc::tree::{SimpleBinomialTree, TreeAmerican, TreeEuropean};
use exotic_mc::McResult;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let result = if args.len() > 1 && args[1] == "--bench" {
        run_benchmark()
    } else {
        run_demo_mode()
    };

    if let Err(e) = result {
        eprintln!("demo failed: {}", e);
        std::process::exit(1);
    }
}

fn run_benchmark() -> McResult<()> {
    let product = PathDependentAsian::equally_spaced(1.0, 52, PayOff::Call { strike: 100.0 })?;
    let market = MarketData::flat(100.0, 0.05, 0.0, 0.2);
    let cfg = SimulationConfig {
        paths: 1_000_000,
        ..Default::default()
    };

    let mut timer = Timer::new();
    timer.start();
    let report = price_parallel(Box::new(product), &market, &cfg)?;
    let elapsed = timer.elapsed_ms() / 1000.0;

    println!("paths,batches,threads,price,stderr,paths_per_sec");
    println!(
        "{},{},{},{:.8},{:.6},{:.0}",
        report.paths,
        cfg.batches,
        rayon::current_num_threads(),
        report.price,
        report.standard_error,
        report.paths as f64 / elapsed
    );
    Ok(())
}

fn run_demo_mode() -> McResult<()> {
    println!("Running exotic-mc Demo\n");

    let (spot, strike, r, d, sigma, expiry) = (100.0, 100.0, 0.05, 0.02, 0.2, 1.0);
    let market = MarketData::flat(spot, r, d, sigma);
    let registry = PayoffRegistry::with_defaults();
    let call = registry.try_create("call", &[strike])?;
    let put = registry.try_create("put", &[strike])?;

    let cfg = SimulationConfig {
        paths: 200_000,
        convergence_table: true,
        ..Default::default()
    };

    // European call against the closed form
    let european = PathDependentAsian::european(expiry, call)?;
    let report = price_path_dependent(Box::new(european), &market, &cfg)?;
    let analytic = bs_analytic::bs_call_price(spot, strike, r, d, sigma, expiry);
    println!("European Call (MC):       {:.4} ± {:.4}", report.price, report.standard_error);
    println!("European Call (Analytic): {:.4}", analytic);

    // Monthly Asian with its convergence table
    let asian = PathDependentAsian::equally_spaced(expiry, 12, call)?;
    let mut timer = Timer::new();
    timer.start();
    let report = price_path_dependent(Box::new(asian), &market, &cfg)?;
    println!(
        "\nAsian Call (12 dates):    {:.4} ± {:.4}  [{:.1} ms]",
        report.price,
        report.standard_error,
        timer.elapsed_ms()
    );
    println!("{:>10} {:>12} {:>12}", "paths", "mean", "std error");
    for row in &report.convergence {
        println!("{:>10} {:>12.6} {:>12.6}", row[2], row[0], row[1]);
    }

    // Weekly up-and-out call with a rebate
    let times: Vec<f64> = (1..=52).map(|i| i as f64 * expiry / 52.0).collect();
    let barrier =
        PathDependentDiscreteBarrier::new(times, expiry, call, 130.0, BarrierDirection::UpAndOut)?
            .with_rebate(1.0)?;
    let report = price_parallel(
        Box::new(barrier),
        &market,
        &SimulationConfig {
            convergence_table: false,
            ..cfg.clone()
        },
    )?;
    println!("\nUp-and-Out Call (130, rebate 1): {:.4} ± {:.4}", report.price, report.standard_error);

    // Tree: American vs European put, with a rate step
    let rate_curve = Parameters::new(PiecewiseConstantParameter::new(
        vec![0.5, 1.0],
        vec![0.04, 0.06],
    )?);
    let mut tree = SimpleBinomialTree::new(
        spot,
        rate_curve,
        Parameters::constant(d),
        sigma,
        500,
        expiry,
    )?;
    let tree_european = tree.price(&TreeEuropean::new(expiry, put)?)?;
    let tree_american = tree.price(&TreeAmerican::new(expiry, put)?)?;
    println!("\nEuropean Put (tree): {:.4}", tree_european);
    println!("American Put (tree): {:.4}", tree_american);
    println!("Early exercise premium: {:.4}", tree_american - tree_european);

    Ok(())
}
