//! Nested timing of a task and its sub-tasks.

use std::time::Instant;

use crate::report::Reporter;
use crate::unit::{TimeUnit, convert, time_call};

/// Times a task made of named sub-tasks.
///
/// Sub-task times accumulate into a tracked total; on stop the timer logs the
/// overall time, the tracked total and the untracked remainder. Nested
/// scopes borrow their parent, so the parent cannot be used until the scope
/// ends, at which point the scope's time counts as one parent sub-task.
///
/// ```rust
/// use warp_log::Console;
/// use warp_timer::{HierarchyTimer, Reporter, TimeUnit};
///
/// let (console, capture) = Console::capture();
/// let mut build = HierarchyTimer::with_reporter("build", TimeUnit::Milliseconds, Reporter::with_console(console));
/// let ast = build.sub_task("parse", || "ast");
/// {
///     let mut codegen = build.scope("codegen");
///     codegen.sub_task("emit", || ast.len());
/// }
/// build.stop();
///
/// let lines = capture.stdout_lines();
/// assert_eq!(lines[0], "[TIMER] : build {");
/// assert_eq!(lines[2], "\t[TIMER] : codegen {");
/// assert!(lines[5].starts_with("} ["));
/// ```
#[derive(Debug)]
pub struct HierarchyTimer<'p> {
    desc: String,
    unit: TimeUnit,
    start: Instant,
    depth: usize,
    /// Sub-task time, in milliseconds.
    tracked_ms: f64,
    parent: Option<&'p mut f64>,
    running: bool,
    reporter: Reporter,
}

impl HierarchyTimer<'static> {
    /// A top-level timer on the global console; logs `[TIMER] : desc {`.
    pub fn new(desc: impl Into<String>, unit: TimeUnit) -> Self {
        Self::with_reporter(desc, unit, Reporter::new())
    }

    pub fn with_reporter(desc: impl Into<String>, unit: TimeUnit, reporter: Reporter) -> Self {
        Self::open(desc.into(), unit, 0, None, reporter)
    }
}

impl<'p> HierarchyTimer<'p> {
    fn open(
        desc: String,
        unit: TimeUnit,
        depth: usize,
        parent: Option<&'p mut f64>,
        reporter: Reporter,
    ) -> Self {
        reporter.hierarchy_open(depth, &desc);
        Self {
            desc,
            unit,
            start: Instant::now(),
            depth,
            tracked_ms: 0.0,
            parent,
            running: true,
            reporter,
        }
    }

    pub fn description(&self) -> &str {
        &self.desc
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Nesting level, 0 for a top-level timer.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Time since creation in the timer's unit.
    pub fn elapsed(&self) -> f64 {
        self.unit.from_duration(self.start.elapsed())
    }

    /// Accumulated sub-task time in the timer's unit.
    pub fn sub_task_total(&self) -> f64 {
        convert(self.tracked_ms, TimeUnit::Milliseconds, self.unit)
    }

    /// Measures `f` as a sub-task, displayed in the timer's unit.
    pub fn sub_task<R, F: FnOnce() -> R>(&mut self, desc: &str, f: F) -> R {
        self.sub_task_in(self.unit, desc, f)
    }

    /// Measures `f` as a sub-task, displayed in `unit`.
    pub fn sub_task_in<R, F: FnOnce() -> R>(&mut self, unit: TimeUnit, desc: &str, f: F) -> R {
        let (value, elapsed_ms) = time_call(TimeUnit::Milliseconds, f);
        self.tracked_ms += elapsed_ms;
        self.reporter.hierarchy_sub(
            self.depth,
            desc,
            convert(elapsed_ms, TimeUnit::Milliseconds, unit),
            unit,
        );
        value
    }

    /// Opens a nested timer one level deeper.
    ///
    /// The nested timer's total is added to this timer's sub-task total when
    /// it stops.
    pub fn scope(&mut self, desc: impl Into<String>) -> HierarchyTimer<'_> {
        HierarchyTimer::open(
            desc.into(),
            self.unit,
            self.depth + 1,
            Some(&mut self.tracked_ms),
            self.reporter.clone(),
        )
    }

    /// Stops the timer and logs the closing line with totals.
    ///
    /// Returns the total in the timer's unit, or `None` if already stopped.
    pub fn stop(&mut self) -> Option<f64> {
        if !self.running {
            return None;
        }
        self.running = false;

        let total_ms = TimeUnit::Milliseconds.from_duration(self.start.elapsed());
        if let Some(parent) = self.parent.as_deref_mut() {
            *parent += total_ms;
        }

        let total = convert(total_ms, TimeUnit::Milliseconds, self.unit);
        self.reporter
            .hierarchy_close(self.depth, total, self.sub_task_total(), self.unit);
        Some(total)
    }
}

impl Drop for HierarchyTimer<'_> {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
