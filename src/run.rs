use std::{hint::black_box, io::Write, time::Instant};

use anyhow::{Context, Result};
use rand::Rng;

use crate::{
  compile::{Compiler, C_SOURCE},
  metric::{Metric, RunResult},
  workload,
};

/// Runs `f` once and returns its output along with the elapsed wall-clock
/// seconds.
fn timed<T>(f: impl FnOnce() -> T) -> (T, f64) {
  let start = Instant::now();
  let output = f();

  (output, start.elapsed().as_secs_f64())
}

/// Runs every workload once, in `Metric::ALL` order, writing one line per
/// workload to `out`.
///
/// A failing compiler is not an error: its metric is recorded as absent and
/// the failure is reported on its line.
///
/// # Errors
///
/// This will return an error if writing to `out` fails.
pub fn run_suite<C, R, W>(scale: u32, compiler: &C, rng: &mut R, out: &mut W) -> Result<RunResult>
where
  C: Compiler + ?Sized,
  R: Rng,
  W: Write,
{
  let scale = u64::from(scale);
  let mut result = RunResult::default();

  writeln!(out, "Starting benchmark (scale: {scale})...").context("write")?;

  let n = 30 * scale;
  let (fib, seconds) = timed(|| workload::fibonacci(black_box(n)));
  writeln!(out, "Fibonacci({n}) result: {fib}, Time: {seconds:.15} seconds").context("write")?;
  result.record(Metric::Fibonacci, Some(seconds));

  let limit = 10_000 * scale;
  let (count, seconds) = timed(|| workload::count_primes(black_box(limit)));
  writeln!(out, "Prime numbers up to {limit}: {count}, Time: {seconds:.15} seconds").context("write")?;
  result.record(Metric::Primes, Some(seconds));

  let size = 100 * scale as usize;
  let (product, seconds) = timed(|| workload::multiply_random(rng, size));
  black_box(product);
  writeln!(
    out,
    "{size}x{size} Matrix multiplication completed, Time: {seconds:.15} seconds"
  )
  .context("write")?;
  result.record(Metric::Matrix, Some(seconds));

  let values = workload::random_values(rng, 100_000 * scale as usize);
  let (sorted, seconds) = timed(|| workload::quicksort(&values));
  black_box(sorted);
  writeln!(
    out,
    "Quicksort of {} elements completed, Time: {seconds:.15} seconds",
    values.len()
  )
  .context("write")?;
  result.record(Metric::Sort, Some(seconds));

  let (acc, seconds) = timed(|| workload::float_ops(rng, 1_000_000 * scale));
  black_box(acc);
  writeln!(
    out,
    "1000000 * {scale} floating point operations completed, Time: {seconds:.15} seconds"
  )
  .context("write")?;
  result.record(Metric::FloatOps, Some(seconds));

  match compiler.compile(C_SOURCE) {
    Ok(elapsed) => {
      let seconds = elapsed.as_secs_f64();
      writeln!(out, "GCC compilation test completed, Time: {seconds:.15} seconds").context("write")?;
      result.record(Metric::Compile, Some(seconds));
    }
    Err(err) => {
      writeln!(out, "GCC compilation test failed: {err}").context("write")?;
      result.record(Metric::Compile, None);
    }
  }

  Ok(result)
}
