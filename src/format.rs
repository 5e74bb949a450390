use std::fmt::Write;

use anyhow::Result;

use crate::stats::{Aggregate, Scores};

/// Renders the end-of-session report: averages, relative scores and both
/// composite scores.
pub fn format(runs: u32, aggregate: &Aggregate, scores: &Scores) -> Result<String> {
  let mut report = String::new();

  writeln!(report, "Average results over {runs} runs:")?;
  for (metric, mean) in aggregate {
    writeln!(report, "{}: {mean:.15} seconds", metric.label())?;
  }

  writeln!(report)?;
  writeln!(report, "Relative Scores (lower is better):")?;
  for (metric, score) in &scores.relative {
    writeln!(report, "{}: {score:.15}", metric.label())?;
  }

  writeln!(report)?;
  writeln!(report, "Composite Score: {:.15} (lower is better)", scores.composite)?;
  writeln!(
    report,
    "Original Composite Score: {:.15} (higher is better)",
    scores.original_composite
  )?;

  Ok(report)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{config::Baseline, metric::Metric};

  #[test]
  fn omitted_metric_is_not_printed() {
    let aggregate: Aggregate = Metric::ALL[..5].iter().map(|&m| (m, 0.5)).collect();
    let scores = Scores::new(&aggregate, &Baseline::from_values(&[0.25; 6]).unwrap());

    let report = format(5, &aggregate, &scores).unwrap();

    assert!(report.starts_with("Average results over 5 runs:\nFibonacci: 0.500000000000000 seconds\n"));
    assert!(report.contains("Floating point operations: 2.000000000000000\n"));
    assert!(!report.contains("GCC compilation"));
    assert!(report.contains("Composite Score: 2.000000000000000 (lower is better)"));
    assert!(report.contains("Original Composite Score: 32000000000.000000000000000 (higher is better)"));
  }
}
