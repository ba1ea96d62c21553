//! Repeated measurements.

use serde::{Deserialize, Serialize};

use crate::report::Reporter;
use crate::stats::BenchmarkStats;
use crate::unit::{TimeUnit, time_call};

/// Default number of timed runs.
pub const DEFAULT_SAMPLES: u32 = 8;

/// How a benchmark runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Timed runs.
    pub samples: u32,
    /// Untimed runs before measuring.
    pub warmup: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            warmup: 0,
        }
    }
}

impl BenchConfig {
    #[must_use]
    pub fn samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    #[must_use]
    pub fn warmup(mut self, warmup: u32) -> Self {
        self.warmup = warmup;
        self
    }
}

/// Runs `f` per `config` and returns each timed run in `unit`.
pub fn collect_samples<F: FnMut()>(config: &BenchConfig, unit: TimeUnit, mut f: F) -> Vec<f64> {
    for _ in 0..config.warmup {
        f();
    }
    (0..config.samples)
        .map(|_| time_call(unit, &mut f).1)
        .collect()
}

/// Runs `f` `samples` times and logs mean, median and mode.
///
/// Returns `None` (after logging a warning) when `samples` is 0.
pub fn benchmark<F: FnMut()>(desc: &str, unit: TimeUnit, samples: u32, f: F) -> Option<BenchmarkStats> {
    Reporter::new().benchmark_with(desc, unit, &BenchConfig::default().samples(samples), f)
}

impl Reporter {
    /// Benchmarks `f` and logs the statistics block here.
    pub fn benchmark_with<F: FnMut()>(
        &self,
        desc: &str,
        unit: TimeUnit,
        config: &BenchConfig,
        f: F,
    ) -> Option<BenchmarkStats> {
        let samples = collect_samples(config, unit, f);
        tracing::debug!(desc, samples = samples.len(), warmup = config.warmup, "benchmark finished");
        self.report_samples(desc, &samples, unit)
    }

    /// Logs the statistics of pre-collected samples.
    pub fn report_samples(&self, desc: &str, samples: &[f64], unit: TimeUnit) -> Option<BenchmarkStats> {
        match BenchmarkStats::from_samples(samples) {
            Some(stats) => {
                self.benchmark(desc, &stats, unit);
                Some(stats)
            }
            None => {
                self.empty_benchmark();
                None
            }
        }
    }
}
