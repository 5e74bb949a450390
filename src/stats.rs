use std::collections::BTreeMap;

use crate::{
  config::Baseline,
  metric::{Metric, RunResult},
};

/// Mean seconds per metric across all runs. A metric is only present if every
/// run recorded a timing for it.
pub type Aggregate = BTreeMap<Metric, f64>;

/// Averages each metric over `runs`, omitting any metric that is absent from
/// at least one run.
pub fn aggregate(runs: &[RunResult]) -> Aggregate {
  if runs.is_empty() {
    return Aggregate::new();
  }

  Metric::ALL
    .into_iter()
    .filter_map(|metric| {
      let times = runs.iter().map(|run| run.get(metric)).collect::<Option<Vec<f64>>>()?;
      let mean = times.iter().sum::<f64>() / times.len() as f64;

      Some((metric, mean))
    })
    .collect()
}

/// Aggregated timings normalized against a baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct Scores {
  /// `mean / baseline` per metric; lower is better.
  pub relative: BTreeMap<Metric, f64>,
  /// Geometric mean of the relative scores; lower is better.
  pub composite: f64,
  /// `1e9 / product(means)`; higher is better.
  pub original_composite: f64,
}

impl Scores {
  pub fn new(aggregate: &Aggregate, baseline: &Baseline) -> Self {
    let relative: BTreeMap<Metric, f64> = aggregate
      .iter()
      .map(|(&metric, &mean)| (metric, mean / baseline.get(metric)))
      .collect();

    Self {
      composite: geometric_mean(relative.values().copied()),
      original_composite: 1e9 / aggregate.values().product::<f64>(),
      relative,
    }
  }
}

/// `product^(1/count)`. NaN for an empty input.
pub fn geometric_mean<I: IntoIterator<Item = f64>>(values: I) -> f64 {
  let (product, count) = values
    .into_iter()
    .fold((1.0, 0u32), |(product, count), v| (product * v, count + 1));

  if count == 0 {
    return f64::NAN;
  }

  product.powf(1.0 / f64::from(count))
}
