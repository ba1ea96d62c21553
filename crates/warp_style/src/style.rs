//! Text styles.
//!
//! A [`Style`] is a foreground color plus a few SGR attributes. Styles are
//! built with a fluent API and rendered either unconditionally
//! ([`Style::render`]) or against a resolved color decision
//! ([`Style::render_with`]).
//!
//! ```rust
//! use warp_style::{AnsiFore, Style};
//!
//! let style = Style::new().bold().foreground(AnsiFore::Blue);
//! assert_eq!(style.render("[TIMER]"), "\x1b[1m\x1b[34m[TIMER]\x1b[0m");
//! assert_eq!(style.render_with("[TIMER]", false), "[TIMER]");
//! ```

use bitflags::bitflags;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::UnicodeWidthStr;

use crate::color::{AnsiFore, reset_color};

bitflags! {
    /// Boolean attribute values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attrs: u8 {
        const BOLD = 1 << 0;
        const FAINT = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        /// Swap the foreground color into the background.
        const REVERSE = 1 << 4;
    }
}

/// A terminal style definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    attrs: Attrs,
    fg: Option<AnsiFore>,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            attrs: Attrs::empty(),
            fg: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.attrs |= Attrs::BOLD;
        self
    }

    pub fn faint(mut self) -> Self {
        self.attrs |= Attrs::FAINT;
        self
    }

    pub fn italic(mut self) -> Self {
        self.attrs |= Attrs::ITALIC;
        self
    }

    pub fn underline(mut self) -> Self {
        self.attrs |= Attrs::UNDERLINE;
        self
    }

    /// Renders the color as a background block, as used for fatal levels.
    pub fn reverse(mut self) -> Self {
        self.attrs |= Attrs::REVERSE;
        self
    }

    pub fn foreground(mut self, fg: AnsiFore) -> Self {
        self.fg = Some(fg);
        self
    }

    pub fn get_foreground(&self) -> Option<AnsiFore> {
        self.fg
    }

    pub fn attrs(&self) -> Attrs {
        self.attrs
    }

    /// True when rendering would not add any escape sequence.
    pub fn is_plain(&self) -> bool {
        self.attrs.is_empty() && self.fg.is_none()
    }

    /// Opening escape sequence for this style, empty for a plain style.
    pub fn prefix(&self) -> String {
        let mut start = String::new();
        if self.attrs.contains(Attrs::BOLD) {
            start.push_str("\x1b[1m");
        }
        if self.attrs.contains(Attrs::FAINT) {
            start.push_str("\x1b[2m");
        }
        if self.attrs.contains(Attrs::ITALIC) {
            start.push_str("\x1b[3m");
        }
        if self.attrs.contains(Attrs::UNDERLINE) {
            start.push_str("\x1b[4m");
        }
        if let Some(fg) = self.fg {
            if self.attrs.contains(Attrs::REVERSE) {
                start.push_str(&format!("\x1b[{}m", fg.background_code()));
            } else {
                start.push_str(&fg.escape());
            }
        }
        start
    }

    /// Renders `text` with escape sequences.
    pub fn render(&self, text: &str) -> String {
        self.render_with(text, true)
    }

    /// Renders `text`, emitting escape sequences only when `colors` is set.
    pub fn render_with(&self, text: &str, colors: bool) -> String {
        if !colors || self.is_plain() {
            return text.to_string();
        }
        let start = self.prefix();
        let mut out = String::with_capacity(start.len() + text.len() + 4);
        out.push_str(&start);
        out.push_str(text);
        out.push_str(reset_color());
        out
    }
}

impl From<AnsiFore> for Style {
    fn from(fg: AnsiFore) -> Self {
        Style::new().foreground(fg)
    }
}

static ANSI_SEQUENCE: Lazy<Regex> = Lazy::new(|| {
    // CSI sequences (colors, cursor movement) and OSC sequences (hyperlinks, titles)
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)")
        .expect("ANSI pattern is valid")
});

/// Removes ANSI escape sequences from `text`.
pub fn strip_ansi(text: &str) -> String {
    if !text.contains('\x1b') {
        return text.to_string();
    }
    ANSI_SEQUENCE.replace_all(text, "").into_owned()
}

/// Display width of `text` in terminal cells, ignoring escape sequences.
pub fn visible_width(text: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(text).as_str())
}
