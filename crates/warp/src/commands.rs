//! What the `demo` and `bench` subcommands do.

use std::hint::black_box;
use std::sync::Arc;

use warp_log::{Console, Logger, Tag, concat_tags};
use warp_mini::{Mini, MiniLevel, ScopeTracer};
use warp_style::AnsiFore;
use warp_timer::{BenchmarkStats, HierarchyTimer, Reporter};

use crate::config::WarpConfig;

/// A CPU-bound loop the optimizer cannot remove.
pub fn workload(iterations: u64) -> u64 {
    (1..=iterations).fold(0u64, |acc, n| {
        black_box(acc.rotate_left(5) ^ n.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    })
}

/// Shows every logger level, a timed line, tag concatenation, a hierarchy
/// timer and the mini logger.
pub fn run_demo(console: &Arc<Console>, config: &WarpConfig) {
    let logger = Logger::new(Tag::colored(AnsiFore::Magenta, "[DEMO]")).with_console(Arc::clone(console));
    logger.msg("plain message, no level label");
    logger.debug("debug line (debug builds only)");
    logger.info("info line");
    logger.warn("warning line");
    logger.error("error line");
    logger.infof("{} + {} = {}", &[&2, &3, &5]);

    let child = logger.with_tag(Tag::colored(AnsiFore::Green, "[CHILD]"));
    child.info("nested context");

    let timed = config
        .log
        .timed_logger(Tag::colored(AnsiFore::Cyan, "[CLOCK]"))
        .with_console(Arc::clone(console));
    timed.info("timestamped line");

    let tags = [
        Tag::colored(AnsiFore::Red, "[A]"),
        Tag::colored(AnsiFore::Yellow, "[B]"),
        Tag::plain("[C]"),
    ];
    logger.msg(format_args!("tags: {}", concat_tags(&tags, "", console.colors())));

    let reporter = Reporter::with_console(Arc::clone(console));
    let unit = config.timer.unit;
    reporter.measure("single workload run", unit, || {
        black_box(workload(10_000));
    });
    {
        let mut pipeline = HierarchyTimer::with_reporter("pipeline", unit, reporter);
        pipeline.sub_task("parse", || black_box(workload(5_000)));
        {
            let mut render = pipeline.scope("render");
            render.sub_task("layout", || black_box(workload(2_000)));
            render.sub_task("paint", || black_box(workload(2_000)));
        }
    }

    let mini = Mini::new(config.mini.clone().min_level(MiniLevel::Trace), Arc::clone(console));
    let _tracer = ScopeTracer::on(&mini, "run_demo()");
    mini.write(MiniLevel::Info, format_args!("mini logger line"));
    mini.test_case(workload(3) != 0, "workload(3) != 0");
}

/// Benchmarks [`workload`] per the timer settings and logs the statistics.
///
/// Returns `None` when the sample count is zero.
pub fn run_bench(console: &Arc<Console>, config: &WarpConfig, iterations: u64) -> Option<BenchmarkStats> {
    let reporter = Reporter::with_console(Arc::clone(console));
    let unit = config.timer.unit;
    let desc = format!("workload ({iterations} iterations)");
    let stats = reporter.benchmark_with(&desc, unit, &config.timer.bench, || {
        black_box(workload(black_box(iterations)));
    })?;
    reporter.logger().print(format_args!(
        "[RANGE] : {:.3} .. {:.3} {unit} (std dev {:.3}, {} samples)",
        stats.min, stats.max, stats.std_dev, stats.count
    ));
    Some(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp_style::strip_ansi;
    use warp_timer::{BenchConfig, TimeUnit};

    #[test]
    fn workload_depends_on_iterations() {
        assert_eq!(workload(0), 0);
        assert_ne!(workload(10), workload(11));
        assert_eq!(workload(100), workload(100));
    }

    #[test]
    fn demo_covers_every_level() {
        let (console, capture) = Console::capture();
        run_demo(&console, &WarpConfig::default());
        let out = capture.stdout();
        let err = capture.stderr();
        assert!(out.contains("[DEMO] : [INFO] : info line"));
        assert!(out.contains("[DEMO] : [INFO] : 2 + 3 = 5"));
        assert!(out.contains("[DEMO][CHILD] : [INFO] : nested context"));
        assert!(out.contains("[TIMER] : pipeline {"));
        assert!(out.contains("[INFO]  : mini logger line"));
        assert!(out.contains("[TEST][PASS] : workload(3) != 0"));
        assert!(err.contains("[DEMO] : plain message"));
        assert!(err.contains("tags: [A][B][C]"));
        assert!(err.contains("[DEMO] : [WARN] : warning line"));
        assert!(err.contains("[DEMO] : [ERROR] : error line"));
    }

    #[test]
    fn demo_timed_line_has_stamp() {
        let (console, capture) = Console::capture();
        run_demo(&console, &WarpConfig::default());
        let line = capture
            .stdout_lines()
            .into_iter()
            .find(|l| l.ends_with("timestamped line"))
            .unwrap();
        assert!(line.contains("][CLOCK] : [INFO] : "));
        assert!(line.starts_with('['));
    }

    #[test]
    fn demo_colors_follow_console() {
        let (console, capture) = Console::capture();
        console.set_colors(true);
        run_demo(&console, &WarpConfig::default());
        let out = capture.stdout();
        assert!(out.contains("\x1b["));
        assert!(strip_ansi(&out).contains("[DEMO] : [INFO] : info line"));
    }

    #[test]
    fn bench_reports_statistics() {
        let (console, capture) = Console::capture();
        let mut config = WarpConfig::default();
        config.timer.unit = TimeUnit::Microseconds;
        config.timer.bench = BenchConfig::default().samples(3);
        let stats = run_bench(&console, &config, 100).unwrap();
        assert_eq!(stats.count, 3);
        let out = capture.stdout();
        assert!(out.contains("[TIMER][BENCHMARK] : workload (100 iterations)"));
        assert!(out.contains("[MEAN]"));
        assert!(out.contains("3 samples"));
    }

    #[test]
    fn bench_without_samples_warns() {
        let (console, capture) = Console::capture();
        let mut config = WarpConfig::default();
        config.timer.bench = BenchConfig::default().samples(0);
        assert!(run_bench(&console, &config, 10).is_none());
        assert!(capture.stderr().contains("Trying to benchmark empty results"));
    }
}
