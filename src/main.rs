mod bench;
mod compile;
mod config;
mod ext;
mod format;
mod metric;
mod run;
mod stats;
mod workload;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use self::{
  bench::Bench,
  compile::{Gcc, WorkDir},
  config::{Baseline, Config, DEFAULT_RUNS, DEFAULT_SCALE},
};

#[derive(Parser)]
struct Args {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  Bench {
    /// Multiplier applied to every workload's input size.
    #[arg(long, default_value_t = DEFAULT_SCALE, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,
    /// How many times to repeat the whole suite.
    #[arg(long, default_value_t = DEFAULT_RUNS, value_parser = clap::value_parser!(u32).range(1..))]
    runs: u32,
    /// Native compiler used for the compilation metric.
    #[arg(long, default_value = "gcc")]
    compiler: PathBuf,
    /// Directory where `test.c` and `test` are written.
    #[arg(long, default_value = ".")]
    work_dir: PathBuf,
    /// Compile in a fresh temporary directory instead of `--work-dir`.
    #[arg(long, conflicts_with = "work_dir")]
    isolated: bool,
    /// Kill the compiler after this many seconds.
    #[arg(long)]
    compile_timeout: Option<f64>,
    /// Reference timings, one per workload, comma separated.
    #[arg(long, value_delimiter = ',')]
    baseline: Vec<f64>,
  },
}

fn main() -> Result<()> {
  match Args::parse().command {
    Command::Bench {
      scale,
      runs,
      compiler,
      work_dir,
      isolated,
      compile_timeout,
      baseline,
    } => {
      let baseline = if baseline.is_empty() {
        Baseline::default()
      } else {
        Baseline::from_values(&baseline).context("baseline")?
      };

      let timeout = compile_timeout
        .map(config::compile_timeout)
        .transpose()
        .context("compile timeout")?;

      let work_dir = if isolated {
        WorkDir::Isolated
      } else {
        if !work_dir.is_dir() {
          anyhow::bail!("{work_dir:?} is not a directory");
        }
        WorkDir::Path(work_dir)
      };

      let config = Config { scale, runs, baseline };
      let mut bench = Bench::new(config, Gcc::new(compiler, work_dir, timeout));

      bench.bench(&mut rand::rng(), &mut io::stdout().lock()).context("bench")?;

      println!("{}", bench.report().context("format")?);
    }
  }

  Ok(())
}
