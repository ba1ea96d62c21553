//! Runtime format strings.
//!
//! `format!` checks its template at compile time. Templates that only exist
//! at runtime (from configuration, user input, or a foreign caller) go
//! through [`format_runtime`] instead, which understands the same basic
//! placeholder syntax:
//!
//! - `{}` takes the next argument
//! - `{N}` takes argument `N`
//! - `{{` and `}}` are literal braces
//!
//! Every argument must be used, mirroring `format!`.

use std::fmt::{self, Write};

use thiserror::Error;

use crate::level::Level;

/// Problems found while expanding a runtime format string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A `{` without its closing `}`.
    #[error("unmatched '{{' at byte {0}")]
    UnmatchedOpen(usize),
    /// A lone `}`.
    #[error("unmatched '}}' at byte {0}")]
    UnmatchedClose(usize),
    /// A placeholder that is neither `{}` nor `{N}`.
    #[error("invalid placeholder {{{spec}}} at byte {position}")]
    InvalidPlaceholder { spec: String, position: usize },
    /// A placeholder referring past the end of the arguments.
    #[error("argument index {index} out of range ({count} arguments given)")]
    IndexOutOfRange { index: usize, count: usize },
    /// Arguments that no placeholder consumed.
    #[error("{unused} of {given} arguments never used")]
    UnusedArguments { unused: usize, given: usize },
}

/// A specialized [`Result`] type for runtime formatting.
pub type FormatResult<T> = std::result::Result<T, FormatError>;

/// Expands `template` with `args`.
///
/// ```rust
/// use warp_log::format_runtime;
///
/// let s = format_runtime("{} + {} = {2}", &[&1, &2, &3]).unwrap();
/// assert_eq!(s, "1 + 2 = 3");
/// assert!(format_runtime("{} {}", &[&1]).is_err());
/// ```
pub fn format_runtime(template: &str, args: &[&dyn fmt::Display]) -> FormatResult<String> {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut used = vec![false; args.len()];
    let mut next_implicit = 0usize;

    let mut chars = template.char_indices().peekable();
    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, c)| c == '{').is_some() {
                    out.push('{');
                    continue;
                }

                let mut spec = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    spec.push(c);
                }
                if !closed {
                    return Err(FormatError::UnmatchedOpen(pos));
                }

                let index = if spec.is_empty() {
                    next_implicit += 1;
                    next_implicit - 1
                } else {
                    spec.trim().parse::<usize>().map_err(|_| FormatError::InvalidPlaceholder {
                        spec: spec.clone(),
                        position: pos,
                    })?
                };

                let arg = args.get(index).ok_or(FormatError::IndexOutOfRange {
                    index,
                    count: args.len(),
                })?;
                used[index] = true;
                // Writing into a String cannot fail.
                let _ = write!(out, "{arg}");
            }
            '}' => {
                if chars.next_if(|&(_, c)| c == '}').is_some() {
                    out.push('}');
                } else {
                    return Err(FormatError::UnmatchedClose(pos));
                }
            }
            c => out.push(c),
        }
    }

    let unused = used.iter().filter(|u| !**u).count();
    if unused > 0 {
        return Err(FormatError::UnusedArguments {
            unused,
            given: args.len(),
        });
    }

    Ok(out)
}

/// The line a runtime-format log call writes: the expanded template at
/// `level`, or an error-level line describing a malformed template. `None`
/// for debug calls in release builds.
pub(crate) fn render_or_error(
    level: Level,
    template: &str,
    args: &[&dyn fmt::Display],
) -> Option<(Level, String)> {
    if level == Level::Debug && !cfg!(debug_assertions) {
        return None;
    }
    match format_runtime(template, args) {
        Ok(text) => Some((level, text)),
        Err(e) => {
            tracing::debug!(template, error = %e, "malformed runtime format string");
            Some((Level::Error, format!("malformed format string {template:?}: {e}")))
        }
    }
}
