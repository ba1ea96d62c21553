#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]

//! # Warp Mini
//!
//! The smallest useful subset of the warp tools, driven by macros:
//!
//! ```rust
//! use warp_mini::{wlogi, wlogw, wtest_eq};
//!
//! fn parse(s: &str) -> Option<u32> {
//!     warp_mini::wtrace!();
//!     s.parse().ok()
//! }
//!
//! wlogi!("starting with {} workers", 4);
//! wlogw!("cache disabled");
//! wtest_eq!(parse("42"), Some(42));
//! ```
//!
//! Lines look like `[INFO]  : message`, optionally preceded by a
//! `[HH:MM:SS]` stamp. Trace through info go to stdout, the rest to stderr.
//! Settings live in a process-wide [`MiniConfig`].

use std::fmt;

pub mod check;
pub mod config;
pub mod level;
pub mod sink;
pub mod tracer;

pub use check::{assert_failed, test_case};
pub use config::MiniConfig;
pub use level::{MiniLevel, ParseMiniLevelError};
pub use sink::{Mini, format_line};
pub use tracer::ScopeTracer;

/// Replaces the global configuration.
pub fn set_config(config: MiniConfig) {
    Mini::global().set_config(config);
}

/// The global configuration.
pub fn config() -> std::sync::Arc<MiniConfig> {
    Mini::global().config()
}

/// Writes one line through the global instance.
pub fn write(level: MiniLevel, args: fmt::Arguments<'_>) {
    Mini::global().write(level, args);
}

/// Writes the terminal reset sequence when dropped.
///
/// Keep one alive in `main` so a colored run never leaves the terminal in a
/// colored state.
#[derive(Debug, Default)]
pub struct ResetGuard {
    _private: (),
}

impl ResetGuard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Drop for ResetGuard {
    fn drop(&mut self) {
        Mini::global().reset_terminal();
    }
}

/// Logs at `level`: `wlog!(MiniLevel::Info, "x = {}", x)`.
#[macro_export]
macro_rules! wlog {
    ($level:expr, $($arg:tt)+) => {{
        let level: $crate::MiniLevel = $level;
        if $crate::Mini::global().enabled(level) {
            $crate::write(level, ::std::format_args!($($arg)+));
        }
    }};
}

/// Logs when `cond` holds: `wlog_if!(MiniLevel::Warn, retries > 3, "retrying")`.
#[macro_export]
macro_rules! wlog_if {
    ($level:expr, $cond:expr, $($arg:tt)+) => {
        if $cond {
            $crate::wlog!($level, $($arg)+);
        }
    };
}

#[macro_export]
macro_rules! wlogt {
    ($($arg:tt)+) => { $crate::wlog!($crate::MiniLevel::Trace, $($arg)+) };
}

#[macro_export]
macro_rules! wlogd {
    ($($arg:tt)+) => { $crate::wlog!($crate::MiniLevel::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! wlogi {
    ($($arg:tt)+) => { $crate::wlog!($crate::MiniLevel::Info, $($arg)+) };
}

#[macro_export]
macro_rules! wlogw {
    ($($arg:tt)+) => { $crate::wlog!($crate::MiniLevel::Warn, $($arg)+) };
}

#[macro_export]
macro_rules! wloge {
    ($($arg:tt)+) => { $crate::wlog!($crate::MiniLevel::Error, $($arg)+) };
}

#[macro_export]
macro_rules! wlogf {
    ($($arg:tt)+) => { $crate::wlog!($crate::MiniLevel::Fatal, $($arg)+) };
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        MiniConfig, MiniLevel, ResetGuard, ScopeTracer, wassert, wassert_eq, wassert_ne, wlog,
        wlog_if, wlogd, wloge, wlogf, wlogi, wlogt, wlogw, wtest, wtest_eq, wtest_ne, wtrace,
    };
}
