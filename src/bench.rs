use std::io::Write;

use anyhow::{Context, Result};
use rand::Rng;

use crate::{
  compile::Compiler,
  config::Config,
  format,
  metric::RunResult,
  run,
  stats::{self, Aggregate, Scores},
};

pub struct Bench<C> {
  config: Config,
  /// Stand-in for the native toolchain in the compile metric.
  compiler: C,
  /// One result per completed run, in run order.
  pub runs: Vec<RunResult>,
}

impl<C: Compiler> Bench<C> {
  pub fn new(config: Config, compiler: C) -> Self {
    Self {
      config,
      compiler,
      runs: Vec::new(),
    }
  }

  /// Runs the whole suite `config.runs` times, writing a banner and the
  /// per-workload lines of every run to `out`. Results of any earlier call
  /// are discarded.
  pub fn bench<R: Rng, W: Write>(&mut self, rng: &mut R, out: &mut W) -> Result<()> {
    self.runs.clear();

    for i in 1..=self.config.runs {
      writeln!(out).context("write")?;
      writeln!(out, "Run {i} of {}", self.config.runs).context("write")?;

      let result =
        run::run_suite(self.config.scale, &self.compiler, rng, out).with_context(|| format!("run {i}"))?;
      self.runs.push(result);

      writeln!(out).context("write")?;
      writeln!(out).context("write")?;
    }

    Ok(())
  }

  pub fn aggregate(&self) -> Aggregate {
    stats::aggregate(&self.runs)
  }

  pub fn scores(&self) -> Scores {
    Scores::new(&self.aggregate(), &self.config.baseline)
  }

  pub fn report(&self) -> Result<String> {
    format::format(self.config.runs, &self.aggregate(), &self.scores())
  }
}
