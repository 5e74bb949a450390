use std::{collections::BTreeMap, time::Duration};

use anyhow::Result;

use crate::metric::Metric;

/// Reference timings, in seconds, in `Metric::ALL` order.
const DEFAULT_BASELINE: [f64; 6] = [
  0.133163404464722,
  0.005249691009521,
  0.066241168975830,
  0.168012475967407,
  0.186379480361938,
  0.153760194778442,
];

pub const DEFAULT_SCALE: u32 = 1;
pub const DEFAULT_RUNS: u32 = 5;

/// Per-metric timings of a reference machine. Relative scores divide by these.
#[derive(Clone, Debug, PartialEq)]
pub struct Baseline {
  times: BTreeMap<Metric, f64>,
}

impl Baseline {
  /// Builds a baseline from exactly one value per metric, in `Metric::ALL`
  /// order.
  pub fn from_values(values: &[f64]) -> Result<Self> {
    if values.len() != Metric::ALL.len() {
      anyhow::bail!(
        "expected {} baseline values, got {}",
        Metric::ALL.len(),
        values.len()
      );
    }

    if let Some(bad) = values.iter().find(|v| !(v.is_finite() && **v > 0.0)) {
      anyhow::bail!("baseline values must be positive, got {bad}");
    }

    Ok(Self {
      times: Metric::ALL.into_iter().zip(values.iter().copied()).collect(),
    })
  }

  pub fn get(&self, metric: Metric) -> f64 {
    self.times[&metric]
  }
}

impl Default for Baseline {
  fn default() -> Self {
    Self {
      times: Metric::ALL.into_iter().zip(DEFAULT_BASELINE).collect(),
    }
  }
}

/// Converts a compiler timeout given in seconds, rejecting anything that is
/// not a positive, representable duration.
pub fn compile_timeout(secs: f64) -> Result<Duration> {
  if !(secs.is_finite() && secs > 0.0) {
    anyhow::bail!("compile timeout must be positive, got {secs}");
  }

  Ok(Duration::try_from_secs_f64(secs)?)
}

/// Everything a benchmark session needs to know up front.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
  /// Multiplier applied to every workload's input size.
  pub scale: u32,
  /// How many times the whole suite is repeated.
  pub runs: u32,
  pub baseline: Baseline,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      scale: DEFAULT_SCALE,
      runs: DEFAULT_RUNS,
      baseline: Baseline::default(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_baseline_follows_metric_order() {
    let baseline = Baseline::default();
    assert_eq!(baseline.get(Metric::Fibonacci), 0.133163404464722);
    assert_eq!(baseline.get(Metric::Primes), 0.005249691009521);
    assert_eq!(baseline.get(Metric::Compile), 0.153760194778442);
  }

  #[test]
  fn from_values_requires_one_value_per_metric() {
    assert!(Baseline::from_values(&[1.0; 5]).is_err());
    assert!(Baseline::from_values(&[1.0; 7]).is_err());

    let baseline = Baseline::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    assert_eq!(baseline.get(Metric::Sort), 4.0);
    assert_eq!(baseline.get(Metric::Compile), 6.0);
  }

  #[test]
  fn from_values_rejects_non_positive() {
    assert!(Baseline::from_values(&[1.0, 1.0, 0.0, 1.0, 1.0, 1.0]).is_err());
    assert!(Baseline::from_values(&[1.0, 1.0, 1.0, -2.0, 1.0, 1.0]).is_err());
    assert!(Baseline::from_values(&[1.0, 1.0, 1.0, 1.0, f64::NAN, 1.0]).is_err());
  }

  #[test]
  fn compile_timeout_must_be_positive() {
    assert!(compile_timeout(0.0).is_err());
    assert!(compile_timeout(-1.0).is_err());
    assert!(compile_timeout(f64::NAN).is_err());
    assert!(compile_timeout(f64::INFINITY).is_err());
    assert!(compile_timeout(1e30).is_err());

    assert_eq!(compile_timeout(2.5).unwrap(), Duration::from_millis(2500));
  }

  #[test]
  fn default_config() {
    let config = Config::default();
    assert_eq!(config.scale, 1);
    assert_eq!(config.runs, 5);
    assert_eq!(config.baseline, Baseline::default());
  }
}
