//! The scoped stopwatch and one-shot measurements.

use std::time::Instant;

use crate::report::{NOT_RUNNING, Reporter};
use crate::unit::{TimeUnit, time_call};

/// A stopwatch that logs its elapsed time when stopped or dropped.
///
/// ```rust
/// use warp_log::Console;
/// use warp_timer::{Reporter, TimeUnit, Timer};
///
/// let (console, capture) = Console::capture();
/// {
///     let _timer = Timer::new("startup", TimeUnit::Milliseconds)
///         .with_reporter(Reporter::with_console(console));
///     // work...
/// }
/// assert!(capture.stdout().starts_with("[TIMER]["));
/// assert!(capture.stdout().ends_with(" ms] : startup\n"));
/// ```
#[derive(Debug)]
pub struct Timer {
    desc: String,
    unit: TimeUnit,
    start: Instant,
    running: bool,
    reporter: Reporter,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new("", TimeUnit::Milliseconds)
    }
}

impl Timer {
    /// A running timer.
    pub fn new(desc: impl Into<String>, unit: TimeUnit) -> Self {
        Self {
            desc: desc.into(),
            unit,
            start: Instant::now(),
            running: true,
            reporter: Reporter::new(),
        }
    }

    #[must_use]
    pub fn with_reporter(mut self, reporter: Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn description(&self) -> &str {
        &self.desc
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// (Re)starts the timer from now.
    pub fn start(&mut self) {
        self.running = true;
        self.start = Instant::now();
    }

    /// Same as [`Timer::start`].
    pub fn reset(&mut self) {
        self.start();
    }

    /// Time since the last start in the timer's unit, 0 when stopped.
    pub fn elapsed(&self) -> f64 {
        if self.running {
            self.unit.from_duration(self.start.elapsed())
        } else {
            0.0
        }
    }

    /// Stops the timer and logs the elapsed time.
    ///
    /// Returns `None` (and logs a warning) if the timer was not running.
    pub fn stop(&mut self) -> Option<f64> {
        if !self.running {
            self.reporter.warn(NOT_RUNNING);
            return None;
        }
        let elapsed = self.elapsed();
        self.running = false;
        self.reporter.elapsed(&self.desc, elapsed, self.unit);
        Some(elapsed)
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if self.running {
            let _ = self.stop();
        }
    }
}

/// Times one call of `f`, logs it and returns the elapsed time in `unit`.
pub fn measure<F: FnOnce()>(desc: &str, unit: TimeUnit, f: F) -> f64 {
    Reporter::new().measure(desc, unit, f)
}

/// Like [`measure`], also returning the value produced by `f`.
pub fn measure_with<R, F: FnOnce() -> R>(desc: &str, unit: TimeUnit, f: F) -> (R, f64) {
    Reporter::new().measure_with(desc, unit, f)
}

impl Reporter {
    /// [`measure`] on this reporter's console.
    pub fn measure<F: FnOnce()>(&self, desc: &str, unit: TimeUnit, f: F) -> f64 {
        self.measure_with(desc, unit, f).1
    }

    /// [`measure_with`] on this reporter's console.
    pub fn measure_with<R, F: FnOnce() -> R>(&self, desc: &str, unit: TimeUnit, f: F) -> (R, f64) {
        let (value, elapsed) = time_call(unit, f);
        self.elapsed(desc, elapsed, unit);
        (value, elapsed)
    }

    /// A running [`Timer`] reporting here.
    pub fn timer(&self, desc: impl Into<String>, unit: TimeUnit) -> Timer {
        Timer::new(desc, unit).with_reporter(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;
    use warp_log::Console;

    fn reporter() -> (Reporter, warp_log::Capture) {
        let (console, capture) = Console::capture();
        (Reporter::with_console(console), capture)
    }

    #[test]
    fn stop_logs_and_returns_elapsed() {
        let (reporter, capture) = reporter();
        let mut timer = reporter.timer("load", TimeUnit::Milliseconds);
        thread::sleep(Duration::from_millis(2));
        let elapsed = timer.stop().unwrap();
        assert!(elapsed >= 2.0);
        assert!(!timer.is_running());
        let out = capture.stdout();
        assert!(out.starts_with("[TIMER]["));
        assert!(out.ends_with(" ms] : load\n"));
    }

    #[test]
    fn stopping_twice_warns() {
        let (reporter, capture) = reporter();
        let mut timer = reporter.timer("t", TimeUnit::Microseconds);
        assert!(timer.stop().is_some());
        assert!(timer.stop().is_none());
        assert_eq!(capture.stderr(), format!("[TIMER] : [WARN] : {NOT_RUNNING}\n"));
        assert_eq!(capture.stdout_lines().len(), 1);
    }

    #[test]
    fn elapsed_zero_when_stopped() {
        let (reporter, _capture) = reporter();
        let mut timer = reporter.timer("t", TimeUnit::Seconds);
        let _ = timer.stop();
        assert_eq!(timer.elapsed(), 0.0);
    }

    #[test]
    fn restart_after_stop() {
        let (reporter, capture) = reporter();
        let mut timer = reporter.timer("again", TimeUnit::Milliseconds);
        let _ = timer.stop();
        timer.reset();
        assert!(timer.is_running());
        drop(timer);
        assert_eq!(capture.stdout_lines().len(), 2);
    }

    #[test]
    fn drop_stops_running_timer() {
        let (reporter, capture) = reporter();
        {
            let _timer = reporter.timer("scoped", TimeUnit::Seconds);
        }
        let out = capture.stdout();
        assert!(out.ends_with(" s] : scoped\n"));
        assert!(capture.stderr().is_empty());
    }

    #[test]
    fn drop_after_stop_is_silent() {
        let (reporter, capture) = reporter();
        {
            let mut timer = reporter.timer("once", TimeUnit::Seconds);
            let _ = timer.stop();
        }
        assert_eq!(capture.stdout_lines().len(), 1);
        assert!(capture.stderr().is_empty());
    }

    #[test]
    fn measure_with_returns_value() {
        let (reporter, capture) = reporter();
        let (value, elapsed) = reporter.measure_with("sum", TimeUnit::Microseconds, || {
            (1..=10).sum::<i32>()
        });
        assert_eq!(value, 55);
        assert!(elapsed >= 0.0);
        assert!(capture.stdout().ends_with(" us] : sum\n"));
    }

    #[test]
    fn measure_reports_sleep() {
        let (reporter, _capture) = reporter();
        let elapsed = reporter.measure("sleep", TimeUnit::Milliseconds, || {
            thread::sleep(Duration::from_millis(3));
        });
        assert!(elapsed >= 3.0);
    }
}
