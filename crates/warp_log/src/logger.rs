use std::fmt;
use std::sync::Arc;

use crate::console::Console;
use crate::format::render_or_error;
use crate::level::Level;
use crate::tag::{Tag, concat_tags};

/// Cached context, rendered once in both color modes.
#[derive(Debug)]
struct Context {
    tags: Vec<Tag>,
    delim: String,
    colored: String,
    plain: String,
}

impl Context {
    fn new(tags: Vec<Tag>, delim: &str) -> Self {
        Self {
            colored: concat_tags(&tags, delim, true),
            plain: concat_tags(&tags, delim, false),
            delim: delim.to_string(),
            tags,
        }
    }

    fn render(&self, colors: bool) -> &str {
        if colors { &self.colored } else { &self.plain }
    }
}

/// A logger bound to a fixed tag context.
///
/// Cloning is cheap; clones share the context and the console.
///
/// ```rust
/// use warp_log::{Console, Logger, Tag};
/// use warp_style::AnsiFore;
///
/// let (console, capture) = Console::capture();
/// let logger = Logger::new(Tag::colored(AnsiFore::Blue, "[NET]")).with_console(console);
///
/// logger.info("connected");
/// logger.warn(format_args!("retrying in {}s", 3));
///
/// assert_eq!(capture.stdout(), "[NET] : [INFO] : connected\n");
/// assert_eq!(capture.stderr(), "[NET] : [WARN] : retrying in 3s\n");
/// ```
#[derive(Clone)]
pub struct Logger {
    context: Arc<Context>,
    console: Arc<Console>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("context", &self.context.plain)
            .field("console", &self.console)
            .finish()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::untagged()
    }
}

impl Logger {
    /// A logger with a single tag.
    pub fn new(tag: impl Into<Tag>) -> Self {
        Self::from_tags(vec![tag.into()])
    }

    /// A logger without any prefix.
    pub fn untagged() -> Self {
        Self::from_tags(Vec::new())
    }

    /// A logger whose context is the concatenation of `tags`.
    pub fn from_tags(tags: Vec<Tag>) -> Self {
        Self::from_tags_with_delim(tags, "")
    }

    /// Same as [`Logger::from_tags`] with a delimiter between tags.
    pub fn from_tags_with_delim(tags: Vec<Tag>, delim: &str) -> Self {
        Self {
            context: Arc::new(Context::new(tags, delim)),
            console: Console::global(),
        }
    }

    /// Routes this logger to another console.
    #[must_use]
    pub fn with_console(mut self, console: Arc<Console>) -> Self {
        self.console = console;
        self
    }

    /// A child logger with `tag` appended to the context, joined with the
    /// parent's delimiter.
    #[must_use]
    pub fn with_tag(&self, tag: impl Into<Tag>) -> Self {
        let mut tags = self.context.tags.clone();
        tags.push(tag.into());
        Self {
            context: Arc::new(Context::new(tags, &self.context.delim)),
            console: Arc::clone(&self.console),
        }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.context.tags
    }

    pub fn console(&self) -> &Arc<Console> {
        &self.console
    }

    /// The context as it is written to the console right now.
    pub fn context(&self) -> &str {
        self.context.render(self.console.colors())
    }

    /// Writes `msg` at `level` behind this logger's context.
    pub fn log(&self, level: Level, msg: impl fmt::Display) {
        if !self.console.enabled(level) {
            return;
        }
        let text = msg.to_string();
        self.console.write_line(level, self.context(), &text);
    }

    /// Same as [`Logger::log`] with an extra prefix in front of the context.
    pub(crate) fn log_prefixed(&self, level: Level, before: &str, msg: impl fmt::Display) {
        if !self.console.enabled(level) {
            return;
        }
        let mut prefix = String::with_capacity(before.len() + self.context().len());
        prefix.push_str(before);
        prefix.push_str(self.context());
        self.console.write_line(level, &prefix, &msg.to_string());
    }

    /// Report line on stdout without a level label; never filtered.
    pub fn print(&self, msg: impl fmt::Display) {
        self.console.print_line(self.context(), &msg.to_string());
    }

    /// Plain line without a level label.
    pub fn msg(&self, msg: impl fmt::Display) {
        self.log(Level::Message, msg);
    }

    pub fn info(&self, msg: impl fmt::Display) {
        self.log(Level::Info, msg);
    }

    /// Debug line; compiled to nothing in release builds.
    pub fn debug(&self, msg: impl fmt::Display) {
        if cfg!(debug_assertions) {
            self.log(Level::Debug, msg);
        }
    }

    pub fn warn(&self, msg: impl fmt::Display) {
        self.log(Level::Warn, msg);
    }

    pub fn error(&self, msg: impl fmt::Display) {
        self.log(Level::Error, msg);
    }

    /// Logs a runtime format string.
    ///
    /// A malformed template is reported as an error-level line instead of
    /// the message.
    pub fn logf(&self, level: Level, template: &str, args: &[&dyn fmt::Display]) {
        if let Some((level, text)) = render_or_error(level, template, args) {
            self.log(level, text);
        }
    }

    pub fn msgf(&self, template: &str, args: &[&dyn fmt::Display]) {
        self.logf(Level::Message, template, args);
    }

    pub fn infof(&self, template: &str, args: &[&dyn fmt::Display]) {
        self.logf(Level::Info, template, args);
    }

    pub fn debugf(&self, template: &str, args: &[&dyn fmt::Display]) {
        self.logf(Level::Debug, template, args);
    }

    pub fn warnf(&self, template: &str, args: &[&dyn fmt::Display]) {
        self.logf(Level::Warn, template, args);
    }

    pub fn errorf(&self, template: &str, args: &[&dyn fmt::Display]) {
        self.logf(Level::Error, template, args);
    }
}

/// Logs a plain message: `log_msg!(logger, "took {}ms", 3)`.
#[macro_export]
macro_rules! log_msg {
    ($logger:expr, $($arg:tt)*) => {
        $logger.msg(format_args!($($arg)*))
    };
}

/// Logs at info level: `log_info!(logger, "listening on {}", port)`.
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format_args!($($arg)*))
    };
}

/// Logs at debug level (no-op in release builds).
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(format_args!($($arg)*))
    };
}

/// Logs at warn level.
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(format_args!($($arg)*))
    };
}

/// Logs at error level.
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(format_args!($($arg)*))
    };
}
