#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::use_self)]

//! # Warp Style
//!
//! The ANSI foreground palette and text styling shared by the warp console
//! tools.
//!
//! - **Colors**: the 16 standard ANSI foreground colors plus the terminal default
//! - **Styles**: foreground color with bold, faint, italic, underline and reverse
//! - **Detection**: `NO_COLOR`, `TERM=dumb` and terminal checks behind [`ColorMode`]
//!
//! ## Quick Start
//!
//! ```rust
//! use warp_style::{AnsiFore, Style, colorize, strip_ansi};
//!
//! let tag = colorize(AnsiFore::Blue, "[REGISTRY]");
//! assert_eq!(strip_ansi(&tag), "[REGISTRY]");
//!
//! let pass = Style::new().bold().foreground(AnsiFore::Green);
//! println!("{}", pass.render("[PASS]"));
//! ```

pub mod color;
pub mod renderer;
pub mod style;

pub use color::{AnsiFore, ParseColorError, colorize, reset_color, set_color};
pub use renderer::{ColorMode, ParseColorModeError, Stream, env_allows_color, env_allows_color_with};
pub use style::{Attrs, Style, strip_ansi, visible_width};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{AnsiFore, ColorMode, Stream, Style, colorize, reset_color, strip_ansi};
}
