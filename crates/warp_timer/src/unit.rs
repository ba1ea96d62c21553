//! Time units and elapsed-time rendering.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use warp_style::{AnsiFore, Style};

/// Unit an elapsed time is reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeUnit {
    #[serde(rename = "us")]
    Microseconds,
    #[default]
    #[serde(rename = "ms")]
    Milliseconds,
    #[serde(rename = "s")]
    Seconds,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 3] = [
        TimeUnit::Microseconds,
        TimeUnit::Milliseconds,
        TimeUnit::Seconds,
    ];

    /// Microseconds per unit.
    const fn micros(self) -> f64 {
        match self {
            Self::Microseconds => 1.0,
            Self::Milliseconds => 1_000.0,
            Self::Seconds => 1_000_000.0,
        }
    }

    /// Short suffix: `us`, `ms` or `s`.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Microseconds => "us",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
        }
    }

    /// Expresses `duration` in this unit.
    pub fn from_duration(&self, duration: Duration) -> f64 {
        duration.as_secs_f64() * 1_000_000.0 / self.micros()
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for TimeUnit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "us" | "µs" | "micro" | "micros" | "microseconds" => Ok(Self::Microseconds),
            "ms" | "milli" | "millis" | "milliseconds" => Ok(Self::Milliseconds),
            "s" | "sec" | "secs" | "seconds" => Ok(Self::Seconds),
            _ => Err(ParseUnitError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown time unit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid time unit: {0:?} (expected us, ms or s)")]
pub struct ParseUnitError(pub String);

/// Converts `value` from one unit to another.
///
/// ```rust
/// use warp_timer::{TimeUnit, convert};
///
/// assert_eq!(convert(1.5, TimeUnit::Seconds, TimeUnit::Milliseconds), 1500.0);
/// assert_eq!(convert(250.0, TimeUnit::Microseconds, TimeUnit::Milliseconds), 0.25);
/// ```
pub fn convert(value: f64, from: TimeUnit, to: TimeUnit) -> f64 {
    if from == to {
        return value;
    }
    value * from.micros() / to.micros()
}

/// Renders an elapsed time as `[12.345 ms]`, in yellow when `colors` is set.
pub fn format_elapsed(value: f64, unit: TimeUnit, colors: bool) -> String {
    let text = format!("[{value:.3} {}]", unit.suffix());
    Style::new()
        .foreground(AnsiFore::Yellow)
        .render_with(&text, colors)
}

/// Runs `f` and returns how long it took in milliseconds.
pub fn measure_ms<F: FnOnce()>(f: F) -> f64 {
    let start = Instant::now();
    f();
    TimeUnit::Milliseconds.from_duration(start.elapsed())
}

/// Runs `f`, returning its value and the elapsed time in `unit`.
pub(crate) fn time_call<R, F: FnOnce() -> R>(unit: TimeUnit, f: F) -> (R, f64) {
    let start = Instant::now();
    let value = f();
    (value, unit.from_duration(start.elapsed()))
}
