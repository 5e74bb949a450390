use std::collections::BTreeMap;

/// One timed workload. The declaration order is the order workloads run in
/// and the order they are reported in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
  Fibonacci,
  Primes,
  Matrix,
  Sort,
  FloatOps,
  Compile,
}

impl Metric {
  pub const ALL: [Metric; 6] = [
    Metric::Fibonacci,
    Metric::Primes,
    Metric::Matrix,
    Metric::Sort,
    Metric::FloatOps,
    Metric::Compile,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Metric::Fibonacci => "Fibonacci",
      Metric::Primes => "Prime numbers",
      Metric::Matrix => "Matrix multiplication",
      Metric::Sort => "Quicksort",
      Metric::FloatOps => "Floating point operations",
      Metric::Compile => "GCC compilation",
    }
  }
}

/// Wall-clock seconds recorded for every metric during a single run. A metric
/// maps to `None` when its workload failed to produce a timing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunResult {
  pub timings: BTreeMap<Metric, Option<f64>>,
}

impl RunResult {
  pub fn record(&mut self, metric: Metric, seconds: Option<f64>) {
    self.timings.insert(metric, seconds);
  }

  /// Returns the timing for `metric`, or `None` if it is absent or was never
  /// recorded.
  pub fn get(&self, metric: Metric) -> Option<f64> {
    self.timings.get(&metric).copied().flatten()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn all_is_in_run_order() {
    let mut sorted = Metric::ALL;
    sorted.sort();
    assert_eq!(sorted, Metric::ALL);
  }

  #[test]
  fn missing_and_absent_read_as_none() {
    let mut run = RunResult::default();
    run.record(Metric::Fibonacci, Some(0.5));
    run.record(Metric::Compile, None);

    assert_eq!(run.get(Metric::Fibonacci), Some(0.5));
    assert_eq!(run.get(Metric::Compile), None);
    assert_eq!(run.get(Metric::Sort), None);
  }
}
