//! Logger configuration.
//!
//! Read from the `[log]` table of a TOML file:
//!
//! ```toml
//! [log]
//! color = "auto"           # auto | always | never
//! min_level = "info"       # debug | info | message | warn | error
//! timestamp_color = "light_black"
//! ```
//!
//! `WARP_LOG_LEVEL` and `NO_COLOR` override the file.

use serde::{Deserialize, Serialize};
use warp_style::{AnsiFore, ColorMode};

use crate::console::Console;
use crate::level::Level;
use crate::logger::Logger;
use crate::tag::Tag;
use crate::timed::TimedLogger;

/// Environment variable overriding the minimum level.
pub const LEVEL_ENV: &str = "WARP_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub color: ColorMode,
    pub min_level: Level,
    pub timestamp_color: AnsiFore,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            min_level: Level::Debug,
            timestamp_color: AnsiFore::White,
        }
    }
}

impl LogConfig {
    /// Applies `WARP_LOG_LEVEL` and `NO_COLOR` on top of this configuration.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Same as [`LogConfig::with_env_overrides`] with an injectable lookup.
    #[must_use]
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(LEVEL_ENV) {
            match raw.parse::<Level>() {
                Ok(level) => self.min_level = level,
                Err(e) => tracing::warn!(error = %e, "ignoring {}", LEVEL_ENV),
            }
        }
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            self.color = ColorMode::Never;
        }
        self
    }

    /// Pushes the settings into `console`.
    pub fn apply_to(&self, console: &Console) {
        console.set_color_mode(self.color);
        console.set_min_level(self.min_level);
        tracing::debug!(color = %self.color, min_level = %self.min_level, "log configuration applied");
    }

    /// Pushes the settings into the global console.
    pub fn apply(&self) {
        self.apply_to(&Console::global());
    }

    /// A timed logger using the configured timestamp color.
    pub fn timed_logger(&self, tag: impl Into<Tag>) -> TimedLogger {
        TimedLogger::from_logger(Logger::new(tag)).with_timestamp_color(self.timestamp_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LogConfig::default();
        assert_eq!(config.color, ColorMode::Auto);
        assert_eq!(config.min_level, Level::Debug);
        assert_eq!(config.timestamp_color, AnsiFore::White);
    }

    #[test]
    fn env_overrides_level_and_color() {
        let config = LogConfig::default().with_overrides_from(|key| match key {
            LEVEL_ENV => Some("warn".to_string()),
            "NO_COLOR" => Some("1".to_string()),
            _ => None,
        });
        assert_eq!(config.min_level, Level::Warn);
        assert_eq!(config.color, ColorMode::Never);
    }

    #[test]
    fn invalid_env_level_is_ignored() {
        let config = LogConfig::default().with_overrides_from(|key| {
            (key == LEVEL_ENV).then(|| "loud".to_string())
        });
        assert_eq!(config.min_level, Level::Debug);
    }

    #[test]
    fn apply_to_console() {
        let (console, _capture) = Console::capture();
        let config = LogConfig {
            color: ColorMode::Always,
            min_level: Level::Error,
            ..LogConfig::default()
        };
        config.apply_to(&console);
        assert!(console.colors());
        assert_eq!(console.min_level(), Level::Error);
    }

    #[test]
    fn parse_from_toml() {
        let config: LogConfig = toml::from_str(
            r#"
            color = "never"
            min_level = "message"
            timestamp_color = "light_black"
            "#,
        )
        .unwrap();
        assert_eq!(config.color, ColorMode::Never);
        assert_eq!(config.min_level, Level::Message);
        assert_eq!(config.timestamp_color, AnsiFore::LightBlack);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(toml::from_str::<LogConfig>("colour = \"never\"").is_err());
    }
}
