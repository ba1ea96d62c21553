use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use warp_style::{AnsiFore, Stream};

/// Log level for routing and filtering messages.
///
/// `Message` is a plain line without a level label, written to stderr with
/// the warnings. Report output that must always reach stdout uses
/// [`Console::print_line`](crate::Console::print_line) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum Level {
    /// Debug level (most verbose, compiled out of release builds).
    Debug = -4,
    /// Info level.
    Info = 0,
    /// Unlabeled message.
    Message = 2,
    /// Warning level.
    Warn = 4,
    /// Error level (least verbose).
    Error = 8,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Message,
        Level::Warn,
        Level::Error,
    ];

    /// Returns the lowercase name of the level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Message => "message",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Bracketed label written in front of the message, empty for `Message`.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Debug => "[DEBUG]",
            Self::Info => "[INFO]",
            Self::Message => "",
            Self::Warn => "[WARN]",
            Self::Error => "[ERROR]",
        }
    }

    /// Color of the label.
    #[must_use]
    pub fn color(&self) -> AnsiFore {
        match self {
            Self::Debug => AnsiFore::Cyan,
            Self::Info => AnsiFore::Green,
            Self::Message => AnsiFore::White,
            Self::Warn => AnsiFore::Yellow,
            Self::Error => AnsiFore::Red,
        }
    }

    /// Stream the level is written to: stdout for info and debug, stderr
    /// for everything else.
    #[must_use]
    pub fn stream(&self) -> Stream {
        match self {
            Self::Debug | Self::Info => Stream::Stdout,
            Self::Message | Self::Warn | Self::Error => Stream::Stderr,
        }
    }

    #[must_use]
    pub fn has_label(&self) -> bool {
        !matches!(self, Self::Message)
    }
}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self as i32).cmp(&(*other as i32))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "message" | "msg" => Ok(Self::Message),
            "warn" => Ok(Self::Warn),
            "error" | "err" => Ok(Self::Error),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid log level string.
///
/// Accepted (case-insensitive): `debug`, `info`, `message`/`msg`, `warn`,
/// `error`/`err`.
///
/// ```rust
/// use warp_log::Level;
///
/// assert!("INFO".parse::<Level>().is_ok());
/// assert!("verbose".parse::<Level>().is_err());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid level: {0:?}")]
pub struct ParseLevelError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_by_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Message);
        assert!(Level::Message < Level::Warn);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn labels() {
        assert_eq!(Level::Info.label(), "[INFO]");
        assert_eq!(Level::Debug.label(), "[DEBUG]");
        assert_eq!(Level::Warn.label(), "[WARN]");
        assert_eq!(Level::Error.label(), "[ERROR]");
        assert!(Level::Message.label().is_empty());
        assert!(!Level::Message.has_label());
    }

    #[test]
    fn routing() {
        assert_eq!(Level::Info.stream(), Stream::Stdout);
        assert_eq!(Level::Debug.stream(), Stream::Stdout);
        assert_eq!(Level::Message.stream(), Stream::Stderr);
        assert_eq!(Level::Warn.stream(), Stream::Stderr);
        assert_eq!(Level::Error.stream(), Stream::Stderr);
    }

    #[test]
    fn parse() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("MSG".parse::<Level>().unwrap(), Level::Message);
        assert_eq!("err".parse::<Level>().unwrap(), Level::Error);
        assert!("warning".parse::<Level>().is_err());
    }
}
