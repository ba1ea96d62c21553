//! Built-in suites run by `warp selftest`.
//!
//! Each collection exercises one library through its public API, so a
//! broken build or an environment that mangles output shows up as a
//! failing case rather than a crash.

use std::sync::Arc;

use warp_log::{Console, Level, format_line, format_runtime};
use warp_mini::MiniLevel;
use warp_style::{AnsiFore, Stream, colorize, strip_ansi, visible_width};
use warp_test::{Registry, Suite, Summary, test_eq, test_ne};
use warp_timer::{BenchmarkStats, TimeUnit, convert};

/// A suite writing to the given console.
pub type BuiltinSuite = fn(&Arc<Console>) -> Summary;

/// Every collection in run order.
pub fn collections() -> Vec<(&'static str, Vec<BuiltinSuite>)> {
    vec![
        ("warp_style", vec![style_colors as BuiltinSuite, style_width]),
        ("warp_log", vec![log_levels as BuiltinSuite, log_lines, log_runtime_format]),
        ("warp_timer", vec![timer_stats as BuiltinSuite, timer_units]),
        ("warp_test", vec![test_summaries as BuiltinSuite]),
        ("warp_mini", vec![mini_levels as BuiltinSuite]),
    ]
}

/// Runs every collection; the registry logs the grand total when dropped.
pub fn run_all(console: &Arc<Console>) -> Registry {
    let mut registry = Registry::with_console(Arc::clone(console));
    for (name, suites) in collections() {
        registry.add_collection(name, suites.into_iter().map(|run| move || run(console)));
    }
    registry
}

fn suite(console: &Arc<Console>, desc: &str) -> Suite {
    Suite::with_console(desc, Arc::clone(console))
}

fn style_colors(console: &Arc<Console>) -> Summary {
    let mut suite = suite(console, "color escapes");
    test_eq!(suite, colorize(AnsiFore::Red, "x"), "\x1b[31mx\x1b[0m");
    test_eq!(suite, strip_ansi(&colorize(AnsiFore::Cyan, "tag")), "tag");
    test_eq!(suite, "light_red".parse::<AnsiFore>().ok(), Some(AnsiFore::LightRed));
    test_eq!(suite, AnsiFore::from_code(34), Some(AnsiFore::Blue));
    suite.finish()
}

fn style_width(console: &Arc<Console>) -> Summary {
    let mut suite = suite(console, "visible width");
    test_eq!(suite, visible_width("\x1b[32mabc\x1b[0m"), 3);
    test_eq!(suite, visible_width(""), 0);
    suite.finish()
}

fn log_levels(console: &Arc<Console>) -> Summary {
    let mut suite = suite(console, "levels");
    test_eq!(suite, "warn".parse::<Level>().ok(), Some(Level::Warn));
    test_eq!(suite, Level::Error.stream(), Stream::Stderr);
    test_eq!(suite, Level::Message.stream(), Stream::Stderr);
    suite.check(!Level::Message.has_label(), "message lines have no label");
    suite.finish()
}

fn log_lines(console: &Arc<Console>) -> Summary {
    let mut suite = suite(console, "line layout");
    test_eq!(suite, format_line(Level::Info, "[APP]", "up", false), "[APP] : [INFO] : up\n");
    test_eq!(suite, format_line(Level::Message, "", "bare", false), "bare\n");
    test_eq!(suite, format_line(Level::Warn, "", "w", false), "[WARN] : w\n");
    suite.finish()
}

fn log_runtime_format(console: &Arc<Console>) -> Summary {
    let mut suite = suite(console, "runtime format strings");
    test_eq!(suite, format_runtime("{1}-{0}", &[&"a", &"b"]).ok(), Some("b-a".to_string()));
    test_eq!(suite, format_runtime("{{}}", &[]).ok(), Some("{}".to_string()));
    suite.check(format_runtime("{} {}", &[&1]).is_err(), "missing argument is an error");
    suite.finish()
}

fn timer_stats(console: &Arc<Console>) -> Summary {
    let mut suite = suite(console, "benchmark statistics");
    match BenchmarkStats::from_samples(&[1.0, 2.0, 2.0, 5.0]) {
        Some(stats) => {
            test_eq!(suite, stats.mean, 2.5);
            test_eq!(suite, stats.median, 2.0);
            test_eq!(suite, stats.mode, 2.0);
            test_eq!(suite, stats.count, 4);
        }
        None => {
            suite.check(false, "statistics of four samples");
        }
    }
    suite.check(BenchmarkStats::from_samples(&[]).is_none(), "no samples, no statistics");
    suite.finish()
}

fn timer_units(console: &Arc<Console>) -> Summary {
    let mut suite = suite(console, "time units");
    test_eq!(suite, convert(1.0, TimeUnit::Seconds, TimeUnit::Milliseconds), 1000.0);
    test_eq!(suite, convert(250.0, TimeUnit::Microseconds, TimeUnit::Milliseconds), 0.25);
    test_eq!(suite, "us".parse::<TimeUnit>().ok(), Some(TimeUnit::Microseconds));
    test_eq!(suite, TimeUnit::default(), TimeUnit::Milliseconds);
    suite.finish()
}

fn test_summaries(console: &Arc<Console>) -> Summary {
    let mut suite = suite(console, "summaries");
    let mut a = Summary::new();
    a.add_case(true);
    a.add_case(false);
    let mut b = Summary::new();
    b.add_case(true);
    let sum = a + b;
    test_eq!(suite, sum.total(), 3);
    test_eq!(suite, sum.passed(), 2);
    test_eq!(suite, sum.to_string(), "[2/3]");
    test_ne!(suite, a, b);
    suite.finish()
}

fn mini_levels(console: &Arc<Console>) -> Summary {
    let mut suite = suite(console, "mini levels");
    test_eq!(suite, MiniLevel::Info.label(), "[INFO] ");
    test_eq!(suite, MiniLevel::Fatal.label(), "[FATAL]");
    test_eq!(suite, MiniLevel::Warn.stream(), Stream::Stderr);
    suite.check(MiniLevel::Trace < MiniLevel::Fatal, "levels are ordered by severity");
    test_eq!(
        suite,
        warp_mini::format_line(MiniLevel::Debug, "", format_args!("d"), false),
        "[DEBUG] : d\n"
    );
    suite.finish()
}
