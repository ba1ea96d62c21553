//! Color capability detection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// When to emit ANSI escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color only when writing to a terminal that accepts it.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl ColorMode {
    /// Resolves the mode against the environment for one output stream.
    pub fn resolve(self, stream: Stream) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => env_allows_color() && stream.is_terminal(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown color mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color mode: {0:?} (expected auto, always or never)")]
pub struct ParseColorModeError(pub String);

impl FromStr for ColorMode {
    type Err = ParseColorModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" | "on" | "true" => Ok(ColorMode::Always),
            "never" | "off" | "false" => Ok(ColorMode::Never),
            _ => Err(ParseColorModeError(s.to_string())),
        }
    }
}

/// Standard output stream selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    /// Whether the stream is attached to a terminal.
    #[cfg(feature = "native")]
    pub fn is_terminal(self) -> bool {
        use crossterm::tty::IsTty;
        match self {
            Stream::Stdout => std::io::stdout().is_tty(),
            Stream::Stderr => std::io::stderr().is_tty(),
        }
    }

    /// Whether the stream is attached to a terminal.
    #[cfg(not(feature = "native"))]
    pub fn is_terminal(self) -> bool {
        use std::io::IsTerminal;
        match self {
            Stream::Stdout => std::io::stdout().is_terminal(),
            Stream::Stderr => std::io::stderr().is_terminal(),
        }
    }
}

/// Environment checks shared by every stream: `NO_COLOR` and `TERM=dumb`.
pub fn env_allows_color() -> bool {
    env_allows_color_with(|key| std::env::var(key).ok())
}

/// Same as [`env_allows_color`] with an injectable variable lookup.
pub fn env_allows_color_with<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    // https://no-color.org: any non-empty value disables color
    if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }
    if lookup("TERM").is_some_and(|t| t == "dumb") {
        return false;
    }
    true
}
