use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use warp_style::{AnsiFore, Stream, Style};

/// Severity of a mini log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum MiniLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl MiniLevel {
    pub const ALL: [MiniLevel; 6] = [
        MiniLevel::Trace,
        MiniLevel::Debug,
        MiniLevel::Info,
        MiniLevel::Warn,
        MiniLevel::Error,
        MiniLevel::Fatal,
    ];

    /// Lowest level written by default: everything in debug builds, `Info`
    /// and above in release builds.
    pub const DEFAULT_MIN: MiniLevel = if cfg!(debug_assertions) {
        MiniLevel::Trace
    } else {
        MiniLevel::Info
    };

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    /// Fixed-width label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Trace => "[TRACE]",
            Self::Debug => "[DEBUG]",
            Self::Info => "[INFO] ",
            Self::Warn => "[WARN] ",
            Self::Error => "[ERROR]",
            Self::Fatal => "[FATAL]",
        }
    }

    /// Gray, cyan, green, yellow, red, and a red background for fatal.
    pub fn style(&self) -> Style {
        match self {
            Self::Trace => Style::new().foreground(AnsiFore::LightBlack),
            Self::Debug => Style::new().foreground(AnsiFore::Cyan),
            Self::Info => Style::new().foreground(AnsiFore::Green),
            Self::Warn => Style::new().foreground(AnsiFore::Yellow),
            Self::Error => Style::new().foreground(AnsiFore::Red),
            Self::Fatal => Style::new().foreground(AnsiFore::Red).reverse(),
        }
    }

    pub fn stream(&self) -> Stream {
        if *self < Self::Warn {
            Stream::Stdout
        } else {
            Stream::Stderr
        }
    }
}

impl fmt::Display for MiniLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MiniLevel {
    type Err = ParseMiniLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseMiniLevelError(s.to_string()))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid mini level: {0:?}")]
pub struct ParseMiniLevelError(pub String);
