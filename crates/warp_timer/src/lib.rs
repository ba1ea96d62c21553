#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]

//! # Warp Timer
//!
//! Console timing helpers:
//! - **Timer**: a stopwatch logging `[TIMER][1.234 ms] : desc` when stopped or dropped
//! - **measure**: time a single call
//! - **benchmark**: repeated runs summarized as mean, median and mode
//! - **HierarchyTimer**: a task timed as named, nestable sub-tasks
//!
//! Output goes through [`warp_log::Console`], so timer lines never interleave
//! with other log lines.
//!
//! ## Example
//!
//! ```rust
//! use warp_timer::{TimeUnit, benchmark, measure};
//!
//! let elapsed = measure("allocate", TimeUnit::Microseconds, || {
//!     let _v = vec![0u8; 4096];
//! });
//! assert!(elapsed >= 0.0);
//!
//! let stats = benchmark("sum", TimeUnit::Microseconds, 4, || {
//!     let _ = (0..1000u64).sum::<u64>();
//! })
//! .unwrap();
//! assert_eq!(stats.count, 4);
//! ```

pub mod bench;
pub mod config;
pub mod hierarchy;
pub mod report;
pub mod stats;
pub mod timer;
pub mod unit;

pub use bench::{BenchConfig, DEFAULT_SAMPLES, benchmark, collect_samples};
pub use config::TimerConfig;
pub use hierarchy::HierarchyTimer;
pub use report::{EMPTY_BENCHMARK, NOT_RUNNING, Reporter, render_stats};
pub use stats::BenchmarkStats;
pub use timer::{Timer, measure, measure_with};
pub use unit::{ParseUnitError, TimeUnit, convert, format_elapsed, measure_ms};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        BenchConfig, BenchmarkStats, HierarchyTimer, Reporter, TimeUnit, Timer, benchmark, measure,
        measure_with,
    };
}
