//! Timer configuration, the `[timer]` table:
//!
//! ```toml
//! [timer]
//! unit = "us"
//!
//! [timer.bench]
//! samples = 16
//! warmup = 2
//! ```

use serde::{Deserialize, Serialize};

use crate::bench::BenchConfig;
use crate::unit::TimeUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimerConfig {
    /// Unit used when none is given.
    pub unit: TimeUnit,
    pub bench: BenchConfig,
}

impl TimerConfig {
    #[must_use]
    pub fn unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    #[must_use]
    pub fn bench(mut self, bench: BenchConfig) -> Self {
        self.bench = bench;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TimerConfig::default();
        assert_eq!(config.unit, TimeUnit::Milliseconds);
        assert_eq!(config.bench.samples, 8);
    }

    #[test]
    fn parse_table() {
        let config: TimerConfig = toml::from_str(
            r#"
            unit = "us"

            [bench]
            samples = 16
            warmup = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.unit, TimeUnit::Microseconds);
        assert_eq!(config.bench, BenchConfig { samples: 16, warmup: 2 });
    }

    #[test]
    fn invalid_unit_rejected() {
        assert!(toml::from_str::<TimerConfig>("unit = \"hours\"").is_err());
    }

    #[test]
    fn builder() {
        let config = TimerConfig::default()
            .unit(TimeUnit::Seconds)
            .bench(BenchConfig::default().warmup(1));
        assert_eq!(config.unit, TimeUnit::Seconds);
        assert_eq!(config.bench.warmup, 1);
    }
}
