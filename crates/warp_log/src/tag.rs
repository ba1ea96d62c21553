//! Log tags.
//!
//! A tag is a short text (usually bracketed, like `[TIMER]`) written in
//! front of every line of a logger. Tags keep their color separate from
//! their text so the same tag renders correctly whether or not the console
//! emits escape sequences.

use std::fmt;

use warp_style::{AnsiFore, Style};

/// A line prefix, optionally styled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Tag {
    text: String,
    style: Style,
}

impl Tag {
    /// An uncolored tag.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::new(),
        }
    }

    /// A tag drawn in one foreground color.
    pub fn colored(fg: AnsiFore, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::new().foreground(fg),
        }
    }

    /// A tag with an arbitrary style.
    pub fn styled(style: Style, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Renders the tag, with escape sequences only when `colors` is set.
    pub fn render(&self, colors: bool) -> String {
        self.style.render_with(&self.text, colors)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(true))
    }
}

impl From<&str> for Tag {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for Tag {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

/// Joins rendered tags with `delim`, sizing the buffer once.
pub fn concat_tags(tags: &[Tag], delim: &str, colors: bool) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let rendered: Vec<String> = tags.iter().map(|t| t.render(colors)).collect();
    let total = delim.len() * (rendered.len() - 1) + rendered.iter().map(String::len).sum::<usize>();

    let mut out = String::with_capacity(total);
    out.push_str(&rendered[0]);
    for tag in &rendered[1..] {
        out.push_str(delim);
        out.push_str(tag);
    }
    out
}
