//! ANSI foreground palette.
//!
//! Every color maps onto a single SGR foreground code:
//! - 30-37 for the standard colors
//! - 39 for the terminal default
//! - 90-97 for the light (bright) variants
//!
//! # Example
//!
//! ```rust
//! use warp_style::AnsiFore;
//!
//! assert_eq!(AnsiFore::Blue.code(), 34);
//! assert_eq!("light_red".parse::<AnsiFore>().unwrap(), AnsiFore::LightRed);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Foreground colors understood by every ANSI terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum AnsiFore {
    Black = 30,
    Red = 31,
    Green = 32,
    Yellow = 33,
    Blue = 34,
    Magenta = 35,
    Cyan = 36,
    #[default]
    White = 37,
    /// Terminal default foreground.
    Reset = 39,
    LightBlack = 90,
    LightRed = 91,
    LightGreen = 92,
    LightYellow = 93,
    LightBlue = 94,
    LightMagenta = 95,
    LightCyan = 96,
    LightWhite = 97,
}

impl AnsiFore {
    /// All colors, in code order.
    pub const ALL: [AnsiFore; 17] = [
        AnsiFore::Black,
        AnsiFore::Red,
        AnsiFore::Green,
        AnsiFore::Yellow,
        AnsiFore::Blue,
        AnsiFore::Magenta,
        AnsiFore::Cyan,
        AnsiFore::White,
        AnsiFore::Reset,
        AnsiFore::LightBlack,
        AnsiFore::LightRed,
        AnsiFore::LightGreen,
        AnsiFore::LightYellow,
        AnsiFore::LightBlue,
        AnsiFore::LightMagenta,
        AnsiFore::LightCyan,
        AnsiFore::LightWhite,
    ];

    /// SGR parameter for this color.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Background SGR parameter for the same hue (foreground code + 10).
    pub const fn background_code(self) -> u8 {
        self as u8 + 10
    }

    /// Escape sequence that switches the foreground to this color.
    pub fn escape(self) -> String {
        format!("\x1b[{}m", self.code())
    }

    /// Lowercase snake_case name used in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            AnsiFore::Black => "black",
            AnsiFore::Red => "red",
            AnsiFore::Green => "green",
            AnsiFore::Yellow => "yellow",
            AnsiFore::Blue => "blue",
            AnsiFore::Magenta => "magenta",
            AnsiFore::Cyan => "cyan",
            AnsiFore::White => "white",
            AnsiFore::Reset => "reset",
            AnsiFore::LightBlack => "light_black",
            AnsiFore::LightRed => "light_red",
            AnsiFore::LightGreen => "light_green",
            AnsiFore::LightYellow => "light_yellow",
            AnsiFore::LightBlue => "light_blue",
            AnsiFore::LightMagenta => "light_magenta",
            AnsiFore::LightCyan => "light_cyan",
            AnsiFore::LightWhite => "light_white",
        }
    }

    /// Looks a color up by its SGR code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl fmt::Display for AnsiFore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a color name is not part of the palette.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color: {0:?}")]
pub struct ParseColorError(pub String);

impl FromStr for AnsiFore {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");

        if let Ok(code) = normalized.parse::<u8>() {
            return Self::from_code(code).ok_or_else(|| ParseColorError(s.to_string()));
        }

        // "bright_*" is accepted as an alias of "light_*"
        let normalized = match normalized.strip_prefix("bright_") {
            Some(rest) => format!("light_{rest}"),
            None => normalized,
        };

        Self::ALL
            .into_iter()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| ParseColorError(s.to_string()))
    }
}

impl Serialize for AnsiFore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for AnsiFore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AnsiForeVisitor;

        impl Visitor<'_> for AnsiForeVisitor {
            type Value = AnsiFore;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a color name such as \"blue\" or an SGR code such as 34")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<AnsiFore, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<AnsiFore, E> {
                u8::try_from(v)
                    .ok()
                    .and_then(AnsiFore::from_code)
                    .ok_or_else(|| E::custom(format!("invalid color code: {v}")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<AnsiFore, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("invalid color code: {v}")))
                    .and_then(|v| self.visit_u64(v))
            }
        }

        deserializer.deserialize_any(AnsiForeVisitor)
    }
}

/// Escape sequence that switches the foreground to `fg`.
pub fn set_color(fg: AnsiFore) -> String {
    fg.escape()
}

/// Escape sequence that resets every attribute.
pub const fn reset_color() -> &'static str {
    "\x1b[0m"
}

/// Wraps `text` in `fg` and a reset.
pub fn colorize(fg: AnsiFore, text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 9);
    out.push_str("\x1b[");
    out.push_str(&fg.code().to_string());
    out.push('m');
    out.push_str(text);
    out.push_str(reset_color());
    out
}
