//! Monte Carlo Statistics Gatherers
//!
//! Gatherers receive one discounted value per path and report a small table of
//! results. Each row is one set of statistics; [`ConvergenceTable`] appends the path
//! count as a trailing column.
//!
//! # Convergence Table
//!
//! Snapshots of the inner gatherer are taken after 2, 4, 8, 16, ... paths. Reading
//! the table between two snapshots adds one live row for the current path count.

use std::fmt;

pub trait StatisticsGatherer: fmt::Debug + Send {
    fn dump_one_result(&mut self, result: f64);

    /// Empty until at least one result has been dumped.
    fn results_so_far(&self) -> Vec<Vec<f64>>;

    fn clone_box(&self) -> Box<dyn StatisticsGatherer>;
}

impl Clone for Box<dyn StatisticsGatherer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Running mean: one row `[mean]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsMean {
    running_sum: f64,
    paths_done: u64,
}

impl StatisticsMean {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths_done(&self) -> u64 {
        self.paths_done
    }

    pub fn mean(&self) -> Option<f64> {
        (self.paths_done > 0).then(|| self.running_sum / self.paths_done as f64)
    }

    /// Fold in the results of an independent run.
    pub fn merge(&mut self, other: &StatisticsMean) {
        self.running_sum += other.running_sum;
        self.paths_done += other.paths_done;
    }
}

impl StatisticsGatherer for StatisticsMean {
    fn dump_one_result(&mut self, result: f64) {
        self.running_sum += result;
        self.paths_done += 1;
    }

    fn results_so_far(&self) -> Vec<Vec<f64>> {
        self.mean().map(|mean| vec![vec![mean]]).unwrap_or_default()
    }

    fn clone_box(&self) -> Box<dyn StatisticsGatherer> {
        Box::new(self.clone())
    }
}

/// Mean and standard error of the mean: one row `[mean, standard_error]`
///
/// # Algorithm
///
/// Welford's update keeps the mean and the sum of squared deviations `M₂`:
/// ```text
/// δ    = x - mean
/// mean = mean + δ / n
/// M₂   = M₂ + δ (x - mean)
/// ```
/// Standard error is `√(M₂ / (n - 1) / n)`. When every result is identical, `δ` is
/// always zero and both the mean and a zero error come out exact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsMoments {
    mean: f64,
    m2: f64,
    paths_done: u64,
}

impl StatisticsMoments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths_done(&self) -> u64 {
        self.paths_done
    }

    pub fn mean(&self) -> Option<f64> {
        (self.paths_done > 0).then_some(self.mean)
    }

    pub fn variance(&self) -> Option<f64> {
        (self.paths_done > 1).then(|| self.m2 / (self.paths_done - 1) as f64)
    }

    pub fn standard_error(&self) -> Option<f64> {
        self.variance()
            .map(|variance| (variance / self.paths_done as f64).sqrt())
    }

    /// Combine with an independent run (Chan et al. pairwise update).
    pub fn merge(&mut self, other: &StatisticsMoments) {
        if other.paths_done == 0 {
            return;
        }
        if self.paths_done == 0 {
            *self = other.clone();
            return;
        }
        let n_a = self.paths_done as f64;
        let n_b = other.paths_done as f64;
        let total = n_a + n_b;
        let delta = other.mean - self.mean;

        self.mean += delta * n_b / total;
        self.m2 += other.m2 + delta * delta * n_a * n_b / total;
        self.paths_done += other.paths_done;
    }
}

impl StatisticsGatherer for StatisticsMoments {
    fn dump_one_result(&mut self, result: f64) {
        self.paths_done += 1;
        let delta = result - self.mean;
        self.mean += delta / self.paths_done as f64;
        self.m2 += delta * (result - self.mean);
    }

    fn results_so_far(&self) -> Vec<Vec<f64>> {
        match self.mean() {
            Some(mean) => vec![vec![mean, self.standard_error().unwrap_or(0.0)]],
            None => Vec::new(),
        }
    }

    fn clone_box(&self) -> Box<dyn StatisticsGatherer> {
        Box::new(self.clone())
    }
}

#[derive(Debug, Clone)]
pub struct ConvergenceTable {
    inner: Box<dyn StatisticsGatherer>,
    results_so_far: Vec<Vec<f64>>,
    stopping_point: u64,
    last_snapshot: u64,
    paths_done: u64,
}

impl ConvergenceTable {
    pub fn new<G: StatisticsGatherer + 'static>(inner: G) -> Self {
        Self::from_boxed(Box::new(inner))
    }

    pub fn from_boxed(inner: Box<dyn StatisticsGatherer>) -> Self {
        Self {
            inner,
            results_so_far: Vec::new(),
            stopping_point: 2,
            last_snapshot: 0,
            paths_done: 0,
        }
    }

    pub fn paths_done(&self) -> u64 {
        self.paths_done
    }

    fn rows_with_count(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        self.inner.results_so_far().into_iter().map(move |mut row| {
            row.push(self.paths_done as f64);
            row
        })
    }
}

impl StatisticsGatherer for ConvergenceTable {
    fn dump_one_result(&mut self, result: f64) {
        self.inner.dump_one_result(result);
        self.paths_done += 1;

        if self.paths_done == self.stopping_point {
            self.stopping_point *= 2;
            self.last_snapshot = self.paths_done;
            let snapshot: Vec<Vec<f64>> = self.rows_with_count().collect();
            self.results_so_far.extend(snapshot);
        }
    }

    fn results_so_far(&self) -> Vec<Vec<f64>> {
        let mut rows = self.results_so_far.clone();
        if self.paths_done != self.last_snapshot {
            rows.extend(self.rows_with_count());
        }
        rows
    }

    fn clone_box(&self) -> Box<dyn StatisticsGatherer> {
        Box::new(self.clone())
    }
}
