//! Console output of the timers.

use std::sync::Arc;

use warp_log::{Console, Logger, Tag};
use warp_style::{AnsiFore, Style};

use crate::stats::BenchmarkStats;
use crate::unit::{TimeUnit, format_elapsed};

/// Warning logged when a benchmark has no samples.
pub const EMPTY_BENCHMARK: &str = "Trying to benchmark empty results";

/// Warning logged when stopping a timer that is not running.
pub const NOT_RUNNING: &str = "Trying to stop timer but timer is not running.";

/// Writes timer lines behind a blue `[TIMER]` tag.
///
/// Every timer holds a reporter; cloning is cheap.
#[derive(Debug, Clone)]
pub struct Reporter {
    logger: Logger,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::from_logger(Logger::new(Tag::colored(AnsiFore::Blue, "[TIMER]")))
    }
}

impl Reporter {
    /// A reporter on the global console.
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter on another console.
    pub fn with_console(console: Arc<Console>) -> Self {
        Self::from_logger(
            Logger::new(Tag::colored(AnsiFore::Blue, "[TIMER]")).with_console(console),
        )
    }

    /// A reporter writing behind an arbitrary logger context.
    pub fn from_logger(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    fn colors(&self) -> bool {
        self.logger.console().colors()
    }

    fn write(&self, prefix: &str, msg: &str) {
        self.logger.console().print_line(prefix, msg);
    }

    /// `[TIMER][12.345 ms] : desc`
    pub fn elapsed(&self, desc: &str, value: f64, unit: TimeUnit) {
        let mut prefix = self.logger.context().to_string();
        prefix.push_str(&format_elapsed(value, unit, self.colors()));
        self.write(&prefix, desc);
    }

    pub fn warn(&self, msg: &str) {
        self.logger.warn(msg);
    }

    /// The statistics block written after a benchmark, as one console write.
    pub fn benchmark(&self, desc: &str, stats: &BenchmarkStats, unit: TimeUnit) {
        let bench = self.logger.with_tag(Tag::colored(AnsiFore::Blue, "[BENCHMARK]"));
        bench.print(render_stats(desc, stats, unit, self.colors()));
    }

    pub fn empty_benchmark(&self) {
        let bench = self.logger.with_tag(Tag::colored(AnsiFore::Blue, "[BENCHMARK]"));
        bench.warn(EMPTY_BENCHMARK);
    }

    /// `[TIMER] : desc {`, indented by `depth`.
    pub(crate) fn hierarchy_open(&self, depth: usize, desc: &str) {
        let prefix = format!("{}{}", indent(depth), self.logger.context());
        self.write(&prefix, &format!("{desc} {{"));
    }

    /// `[TIMER][SUB][1.000 ms] : desc`, one level deeper than `depth`.
    pub(crate) fn hierarchy_sub(&self, depth: usize, desc: &str, value: f64, unit: TimeUnit) {
        let colors = self.colors();
        let mut prefix = indent(depth + 1);
        prefix.push_str(self.logger.context());
        prefix.push_str(&Tag::colored(AnsiFore::Blue, "[SUB]").render(colors));
        prefix.push_str(&format_elapsed(value, unit, colors));
        self.write(&prefix, desc);
    }

    /// `} [total] (sub-tasks [x], untracked [y])`
    pub(crate) fn hierarchy_close(&self, depth: usize, total: f64, tracked: f64, unit: TimeUnit) {
        let colors = self.colors();
        let untracked = (total - tracked).max(0.0);
        let line = format!(
            "{}}} {} (sub-tasks {}, untracked {})",
            indent(depth),
            format_elapsed(total, unit, colors),
            format_elapsed(tracked, unit, colors),
            format_elapsed(untracked, unit, colors),
        );
        self.write("", &line);
    }
}

fn indent(depth: usize) -> String {
    "\t".repeat(depth)
}

/// Renders the MEAN / MEDIAN / MODE block following a benchmark description.
pub fn render_stats(desc: &str, stats: &BenchmarkStats, unit: TimeUnit, colors: bool) -> String {
    let label = Style::new().foreground(AnsiFore::Green);
    let suffix = unit.suffix();
    let rows = [
        ("[MEAN]  ", stats.mean),
        ("[MEDIAN]", stats.median),
        ("[MODE]  ", stats.mode),
    ];

    let mut out = String::from(desc);
    for (name, value) in rows {
        out.push_str(&format!(
            "\n\t{} : {value:.3} {suffix}",
            label.render_with(name, colors)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> BenchmarkStats {
        BenchmarkStats::from_samples(&[1.0, 2.0, 2.0, 5.0]).unwrap()
    }

    #[test]
    fn elapsed_line() {
        let (console, capture) = Console::capture();
        Reporter::with_console(console).elapsed("load", 1.5, TimeUnit::Milliseconds);
        assert_eq!(capture.stdout(), "[TIMER][1.500 ms] : load\n");
    }

    #[test]
    fn elapsed_line_colored() {
        let (console, capture) = Console::capture();
        console.set_colors(true);
        Reporter::with_console(console).elapsed("x", 2.0, TimeUnit::Seconds);
        assert_eq!(
            capture.stdout(),
            "\x1b[34m[TIMER]\x1b[0m\x1b[33m[2.000 s]\x1b[0m : x\n"
        );
    }

    #[test]
    fn stats_block() {
        let text = render_stats("sort", &stats(), TimeUnit::Microseconds, false);
        assert_eq!(
            text,
            "sort\n\t[MEAN]   : 2.500 us\n\t[MEDIAN] : 2.000 us\n\t[MODE]   : 2.000 us"
        );
    }

    #[test]
    fn benchmark_block_is_one_write() {
        let (console, capture) = Console::capture();
        Reporter::with_console(console).benchmark("sort", &stats(), TimeUnit::Milliseconds);
        let out = capture.stdout();
        assert!(out.starts_with("[TIMER][BENCHMARK] : sort\n\t[MEAN]   : 2.500 ms\n"));
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn empty_benchmark_warns() {
        let (console, capture) = Console::capture();
        Reporter::with_console(console).empty_benchmark();
        assert_eq!(
            capture.stderr(),
            format!("[TIMER][BENCHMARK] : [WARN] : {EMPTY_BENCHMARK}\n")
        );
    }

    #[test]
    fn hierarchy_lines() {
        let (console, capture) = Console::capture();
        let reporter = Reporter::with_console(console);
        reporter.hierarchy_open(0, "build");
        reporter.hierarchy_sub(0, "parse", 1.0, TimeUnit::Milliseconds);
        reporter.hierarchy_close(0, 3.0, 1.0, TimeUnit::Milliseconds);
        assert_eq!(
            capture.stdout_lines(),
            vec![
                "[TIMER] : build {",
                "\t[TIMER][SUB][1.000 ms] : parse",
                "} [3.000 ms] (sub-tasks [1.000 ms], untracked [2.000 ms])",
            ]
        );
    }

    #[test]
    fn reports_ignore_minimum_level() {
        let (console, capture) = Console::capture();
        console.set_min_level(warp_log::Level::Error);
        let reporter = Reporter::with_console(console);
        reporter.elapsed("load", 1.0, TimeUnit::Milliseconds);
        reporter.benchmark("sort", &stats(), TimeUnit::Milliseconds);
        let out = capture.stdout();
        assert!(out.starts_with("[TIMER][1.000 ms] : load\n"));
        assert!(out.contains("[TIMER][BENCHMARK] : sort\n"));
    }

    #[test]
    fn nested_indentation() {
        let (console, capture) = Console::capture();
        let reporter = Reporter::with_console(console);
        reporter.hierarchy_open(2, "inner");
        assert_eq!(capture.stdout(), "\t\t[TIMER] : inner {\n");
    }
}
