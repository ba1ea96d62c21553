//! `tracing` integration.
//!
//! [`WarpLayer`] forwards `tracing` events to a [`Logger`], so libraries that
//! emit `tracing` diagnostics end up in the same console (and behind the
//! same lock) as the rest of the output.

use std::fmt::{self, Write};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::level::Level;
use crate::logger::Logger;

/// Maps a `tracing` level onto a console level.
pub fn level_from_tracing(level: tracing::Level) -> Level {
    match level {
        tracing::Level::TRACE | tracing::Level::DEBUG => Level::Debug,
        tracing::Level::INFO => Level::Info,
        tracing::Level::WARN => Level::Warn,
        tracing::Level::ERROR => Level::Error,
    }
}

/// Collects the `message` field and any other fields as `key=value`.
#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: String,
}

impl EventVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }
}

/// A `tracing_subscriber` layer writing events through a [`Logger`].
#[derive(Debug, Clone)]
pub struct WarpLayer {
    logger: Logger,
    with_target: bool,
}

impl WarpLayer {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            with_target: false,
        }
    }

    /// Prefixes each message with the event's target (module path).
    #[must_use]
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    fn render(&self, event: &Event<'_>) -> String {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        let body = visitor.finish();
        if self.with_target {
            format!("{}: {body}", event.metadata().target())
        } else {
            body
        }
    }
}

impl<S: Subscriber> Layer<S> for WarpLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = level_from_tracing(*event.metadata().level());
        self.logger.log(level, self.render(event));
    }
}

/// Installs a global subscriber that forwards every event to `logger`.
pub fn init_tracing(logger: Logger) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(WarpLayer::new(logger))
        .try_init()
}

/// Errors installing the tracing bridge.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("invalid tracing filter: {0}")]
    Filter(#[from] ParseError),
    #[error("a global tracing subscriber is already installed: {0}")]
    Init(#[from] TryInitError),
}

/// Like [`init_tracing`], filtered by `RUST_LOG`-style directives.
pub fn init_tracing_with_filter(logger: Logger, directives: &str) -> Result<(), BridgeError> {
    let filter = EnvFilter::try_new(directives)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(WarpLayer::new(logger))
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Console;

    #[test]
    fn level_mapping() {
        assert_eq!(level_from_tracing(tracing::Level::TRACE), Level::Debug);
        assert_eq!(level_from_tracing(tracing::Level::DEBUG), Level::Debug);
        assert_eq!(level_from_tracing(tracing::Level::INFO), Level::Info);
        assert_eq!(level_from_tracing(tracing::Level::WARN), Level::Warn);
        assert_eq!(level_from_tracing(tracing::Level::ERROR), Level::Error);
    }

    #[test]
    fn events_reach_the_console() {
        let (console, capture) = Console::capture();
        let logger = Logger::new("[TRACE]").with_console(console);
        let subscriber = tracing_subscriber::registry().with(WarpLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(port = 8080, "listening");
            tracing::error!("failed");
        });

        assert_eq!(capture.stdout(), "[TRACE] : [INFO] : listening port=8080\n");
        assert_eq!(capture.stderr(), "[TRACE] : [ERROR] : failed\n");
    }

    #[test]
    fn invalid_filter_is_reported() {
        let err = init_tracing_with_filter(Logger::untagged(), "warp=bogus").unwrap_err();
        assert!(matches!(err, BridgeError::Filter(_)));
    }

    #[test]
    fn target_prefix() {
        let (console, capture) = Console::capture();
        let logger = Logger::untagged().with_console(console);
        let subscriber =
            tracing_subscriber::registry().with(WarpLayer::new(logger).with_target(true));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "db", "slow query");
        });

        assert_eq!(capture.stderr(), "[WARN] : db: slow query\n");
    }
}
