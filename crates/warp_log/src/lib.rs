#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::needless_pass_by_value)]

//! # Warp Log
//!
//! Tagged, colorized console logging.
//!
//! Every line has the shape `<context> : <label> : <message>`:
//! - **Context**: the logger's tags, concatenated and rendered once
//! - **Label**: `[DEBUG]`, `[INFO]`, `[WARN]` or `[ERROR]`, colored per level
//! - **Routing**: info and debug go to stdout; unlabeled messages, warnings
//!   and errors go to stderr. [`Logger::print`] writes report lines to
//!   stdout regardless of the minimum level.
//!
//! All loggers write through a [`Console`], which serializes lines behind a
//! single lock so concurrent output never interleaves.
//!
//! ## Example
//!
//! ```rust
//! use warp_log::{Console, Logger, Tag};
//! use warp_style::AnsiFore;
//!
//! let (console, capture) = Console::capture();
//! let logger = Logger::new(Tag::colored(AnsiFore::Green, "[SERVER]")).with_console(console);
//!
//! logger.info("listening");
//! logger.msg("no label here");
//!
//! assert_eq!(capture.stdout_lines(), vec!["[SERVER] : [INFO] : listening"]);
//! assert_eq!(capture.stderr_lines(), vec!["[SERVER] : no label here"]);
//! ```
//!
//! ## Timestamps
//!
//! [`TimedLogger`] adds a `[HH:MM:SS]` tag in front of the context, cached
//! per wall-clock second.

pub mod bridge;
pub mod config;
pub mod console;
pub mod format;
pub mod level;
mod logger;
pub mod tag;
pub mod timed;

pub use bridge::{BridgeError, WarpLayer, init_tracing, init_tracing_with_filter, level_from_tracing};
pub use config::{LEVEL_ENV, LogConfig};
pub use console::{
    BREAK_LINE, Capture, Console, DEFAULT_LINE_CAPACITY, ErrorHandler, SEPARATOR, SharedBuffer,
    format_line, format_line_into,
};
pub use format::{FormatError, FormatResult, format_runtime};
pub use level::{Level, ParseLevelError};
pub use logger::Logger;
pub use tag::{Tag, concat_tags};
pub use timed::{Clock, TIMESTAMP_FORMAT, TimedLogger, system_clock};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{Console, Level, LogConfig, Logger, Tag, TimedLogger};
    pub use crate::{log_debug, log_error, log_info, log_msg, log_warn};
    pub use warp_style::AnsiFore;
}
