//! Command-line interface for the `warp` binary.
//!
//! ```bash
//! # One line per logger level
//! warp demo
//!
//! # Benchmark the built-in workload in microseconds
//! warp bench --samples 16 --unit us
//!
//! # Run the built-in suites (exit code 1 on any failure)
//! warp --color never selftest
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use warp_style::ColorMode;
use warp_timer::TimeUnit;

use crate::config::WarpConfig;

/// Default number of workload iterations per benchmark sample.
pub const DEFAULT_ITERATIONS: u64 = 100_000;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "warp",
    author,
    version,
    about = "Console logging, timing and test-harness toolkit"
)]
pub struct Cli {
    /// Configuration file (TOML with [log], [timer] and [mini] tables)
    #[arg(long, short = 'c', global = true, env = "WARP_CONFIG")]
    pub config: Option<PathBuf>,

    /// When to color output: auto, always or never
    ///
    /// Overrides the configuration file and `NO_COLOR`
    #[arg(long, global = true, value_name = "WHEN")]
    pub color: Option<ColorMode>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print one line per logger level, a timed line and tag concatenation
    Demo,
    /// Benchmark a built-in CPU workload and print its statistics
    Bench(BenchArgs),
    /// Run the built-in suites over the libraries
    Selftest,
}

#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchArgs {
    /// Number of measured samples (defaults to the configured count)
    #[arg(long, short = 'n')]
    pub samples: Option<u32>,

    /// Unit for the statistics: us, ms or s
    #[arg(long, short = 'u')]
    pub unit: Option<TimeUnit>,

    /// Workload iterations per sample
    #[arg(long, short = 'i', default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: u64,
}

impl Cli {
    /// Folds the command-line overrides into `config`.
    pub fn merge_into(&self, mut config: WarpConfig) -> WarpConfig {
        if let Some(color) = self.color {
            config.log.color = color;
            config.mini.color = color != ColorMode::Never;
        }
        if let Command::Bench(args) = &self.command {
            if let Some(samples) = args.samples {
                config.timer.bench.samples = samples;
            }
            if let Some(unit) = args.unit {
                config.timer.unit = unit;
            }
        }
        config
    }
}
