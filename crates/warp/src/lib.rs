#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]

//! # Warp
//!
//! Console logging, timing and test-harness tools in one place.
//!
//! This crate re-exports the component libraries:
//!
//! - [`style`]: ANSI palette and style rendering
//! - [`log`]: tagged console loggers with colored level labels
//! - [`timer`]: stopwatches, benchmarks and hierarchy timers
//! - [`harness`]: a registry / suite / case test harness
//! - [`mini`]: the macro-driven single-module variant
//!
//! and owns the unified [`WarpConfig`] file plus the `warp` binary.
//!
//! ```rust,no_run
//! use warp::prelude::*;
//!
//! let config = WarpConfig::from_env().unwrap_or_default().with_env_overrides();
//! config.apply();
//!
//! let logger = Logger::new(Tag::colored(AnsiFore::Cyan, "[APP]"));
//! logger.info("starting");
//! let elapsed = measure("startup", TimeUnit::Milliseconds, || {
//!     // ...
//! });
//! logger.msg(format_args!("took {elapsed:.3} ms"));
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod selftest;

pub use warp_log as log;
pub use warp_mini as mini;
pub use warp_style as style;
pub use warp_test as harness;
pub use warp_timer as timer;

pub use config::{CONFIG_ENV, ConfigError, WarpConfig};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{ConfigError, WarpConfig};
    pub use warp_log::prelude::*;
    pub use warp_timer::prelude::*;
    pub use warp_test::prelude::*;
}
