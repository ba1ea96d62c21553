//! Logger with a wall-clock timestamp tag.

use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};
use warp_style::AnsiFore;

use crate::console::Console;
use crate::format::render_or_error;
use crate::level::Level;
use crate::logger::Logger;
use crate::tag::Tag;

/// `strftime` pattern of the timestamp tag.
pub const TIMESTAMP_FORMAT: &str = "[%H:%M:%S]";

/// Source of the current local time.
pub type Clock = Arc<dyn Fn() -> DateTime<Local> + Send + Sync>;

/// The system clock.
pub fn system_clock() -> Clock {
    Arc::new(Local::now)
}

#[derive(Debug, Default)]
struct StampCache {
    /// Unix second the cached stamp was rendered for.
    second: Option<i64>,
    text: String,
    color: AnsiFore,
}

/// A [`Logger`] that prefixes each line with a colored `[HH:MM:SS]` tag.
///
/// The rendered stamp is cached and recomputed at most once per wall-clock
/// second.
pub struct TimedLogger {
    logger: Logger,
    clock: Clock,
    cache: Mutex<StampCache>,
}

impl fmt::Debug for TimedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedLogger")
            .field("logger", &self.logger)
            .field("timestamp_color", &self.timestamp_color())
            .finish()
    }
}

impl Default for TimedLogger {
    fn default() -> Self {
        Self::from_logger(Logger::untagged())
    }
}

impl TimedLogger {
    pub fn new(tag: impl Into<Tag>) -> Self {
        Self::from_logger(Logger::new(tag))
    }

    pub fn from_tags(tags: Vec<Tag>) -> Self {
        Self::from_logger(Logger::from_tags(tags))
    }

    pub fn from_logger(logger: Logger) -> Self {
        Self {
            logger,
            clock: system_clock(),
            cache: Mutex::new(StampCache::default()),
        }
    }

    #[must_use]
    pub fn with_timestamp_color(self, color: AnsiFore) -> Self {
        self.set_timestamp_color(color);
        self
    }

    #[must_use]
    pub fn with_console(mut self, console: Arc<Console>) -> Self {
        self.logger = self.logger.with_console(console);
        self
    }

    /// Replaces the clock; used to pin time in tests.
    #[must_use]
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Local> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self.refresh_timestamp();
        self
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn timestamp_color(&self) -> AnsiFore {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).color
    }

    /// Changes the stamp color; takes effect on the next line.
    pub fn set_timestamp_color(&self, color: AnsiFore) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.color = color;
        cache.second = None;
    }

    /// Forces the next line to render a fresh stamp.
    pub fn refresh_timestamp(&self) {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).second = None;
    }

    /// The timestamp tag as it will be written, refreshing the cache if needed.
    pub fn timestamp_tag(&self) -> String {
        let now = (self.clock)();
        let second = now.timestamp();
        let colors = self.logger.console().colors();

        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if cache.second != Some(second) || cache.text.is_empty() {
            cache.text = now.format(TIMESTAMP_FORMAT).to_string();
            cache.second = Some(second);
        }
        Tag::colored(cache.color, cache.text.as_str()).render(colors)
    }

    pub fn log(&self, level: Level, msg: impl fmt::Display) {
        if !self.logger.console().enabled(level) {
            return;
        }
        let stamp = self.timestamp_tag();
        self.logger.log_prefixed(level, &stamp, msg);
    }

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

    /// Runtime-format variant of [`TimedLogger::log`]; malformed templates
    /// become an error line.
    pub fn logf(&self, level: Level, template: &str, args: &[&dyn fmt::Display]) {
        if let Some((level, text)) = render_or_error(level, template, args) {
            self.log(level, text);
        }
    }
}
