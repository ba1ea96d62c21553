//! Integration tests for the mini macros, which always write through the
//! global instance.

use std::process::Command;
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use warp_log::{Capture, Console};
use warp_mini::prelude::*;
use warp_mini::Mini;

static LOCK: Mutex<()> = Mutex::new(());

static CAPTURE: Lazy<Capture> = Lazy::new(|| {
    let (console, capture) = Console::capture();
    Mini::global().set_console(console);
    capture
});

/// Serializes tests on the global instance and resets its state.
fn global_capture(config: MiniConfig) -> (MutexGuard<'static, ()>, &'static Capture) {
    let guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let capture = Lazy::force(&CAPTURE);
    capture.clear();
    warp_mini::set_config(config);
    (guard, capture)
}

fn trace_config() -> MiniConfig {
    MiniConfig::default().min_level(MiniLevel::Trace)
}

// ===========================================================================
// 1. Logging Macros
// ===========================================================================

#[test]
fn leveled_macros() {
    let (_guard, capture) = global_capture(trace_config());
    wlogt!("t{}", 1);
    wlogd!("d");
    wlogi!("i");
    wlogw!("w");
    wloge!("e");
    wlogf!("f");
    assert_eq!(
        capture.stdout_lines(),
        vec!["[TRACE] : t1", "[DEBUG] : d", "[INFO]  : i"]
    );
    assert_eq!(
        capture.stderr_lines(),
        vec!["[WARN]  : w", "[ERROR] : e", "[FATAL] : f"]
    );
}

#[test]
fn minimum_level_filters_macros() {
    let (_guard, capture) = global_capture(MiniConfig::default().min_level(MiniLevel::Error));
    wlogi!("dropped");
    wlogw!("dropped");
    wloge!("kept");
    assert!(capture.stdout().is_empty());
    assert_eq!(capture.stderr_lines(), vec!["[ERROR] : kept"]);
}

#[test]
fn conditional_logging() {
    let (_guard, capture) = global_capture(trace_config());
    let retries = 5;
    wlog_if!(MiniLevel::Info, retries > 3, "retried {} times", retries);
    wlog_if!(MiniLevel::Info, retries > 10, "not logged");
    assert_eq!(capture.stdout_lines(), vec!["[INFO]  : retried 5 times"]);
}

#[test]
fn generic_wlog() {
    let (_guard, capture) = global_capture(trace_config());
    let level = MiniLevel::Debug;
    wlog!(level, "{:>4}", 7);
    assert_eq!(capture.stdout(), "[DEBUG] :    7\n");
}

// ===========================================================================
// 2. Scope Tracing
// ===========================================================================

struct Loader;

impl Loader {
    fn load(&self) -> u32 {
        wtrace!(Loader);
        wlogi!("loading");
        3
    }
}

fn standalone() {
    wtrace!();
}

#[test]
fn trace_free_function() {
    let (_guard, capture) = global_capture(trace_config());
    standalone();
    assert_eq!(
        capture.stdout_lines(),
        vec!["[TRACE] : --{ : standalone()", "[TRACE] : }-- : standalone()"]
    );
}

#[test]
fn trace_method_with_type() {
    let (_guard, capture) = global_capture(trace_config());
    assert_eq!(Loader.load(), 3);
    assert_eq!(
        capture.stdout_lines(),
        vec![
            "[TRACE] : --{ : Loader::load()",
            "[INFO]  : loading",
            "[TRACE] : }-- : Loader::load()",
        ]
    );
}

// ===========================================================================
// 3. Test and Assert Macros
// ===========================================================================

#[test]
fn test_macros_report_expressions() {
    let (_guard, capture) = global_capture(trace_config());
    let v = vec![1, 2, 3];
    assert!(wtest!(v.len() == 3));
    assert!(wtest_eq!(v[0], 1));
    assert!(!wtest_ne!(v[2], 3));
    assert_eq!(
        capture.stdout_lines(),
        vec![
            "[TEST][PASS] : v.len() == 3",
            "[TEST][PASS] : v[0] == 1",
            "[TEST][FAIL] : v[2] != 3",
        ]
    );
}

#[test]
fn passing_asserts_are_silent() {
    let (_guard, capture) = global_capture(trace_config());
    let answer = 42;
    wassert!(answer > 0);
    wassert_eq!(answer, 42);
    wassert_ne!(answer, 0);
    assert!(capture.stdout().is_empty());
    assert!(capture.stderr().is_empty());
}

#[test]
fn reset_guard_writes_on_drop() {
    let (_guard, capture) = global_capture(trace_config());
    {
        let _reset = ResetGuard::new();
        assert!(capture.stdout().is_empty());
    }
    assert_eq!(capture.stdout(), "\x1b[0m\n");
}

const ABORT_CHILD: &str = "WARP_MINI_ABORT_CHILD";

#[test]
fn failed_assert_aborts_process() {
    if std::env::var_os(ABORT_CHILD).is_some() {
        let answer = 41;
        wassert_eq!(answer + 1, 43);
        return;
    }

    let output = Command::new(std::env::current_exe().unwrap())
        .args(["--exact", "failed_assert_aborts_process", "--nocapture", "--test-threads=1"])
        .env(ABORT_CHILD, "1")
        .env("NO_COLOR", "1")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("[FATAL] : [ASSERT][FAILURE] : answer + 1 == 43"),
        "stderr was: {stderr}"
    );
}
