//! Where mini output goes.

use std::fmt;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use warp_log::{Clock, Console, SEPARATOR, TIMESTAMP_FORMAT, system_clock};
use warp_style::{AnsiFore, Stream, Style, colorize};

use crate::config::MiniConfig;
use crate::level::MiniLevel;

static GLOBAL: Lazy<Mini> = Lazy::new(|| Mini::new(MiniConfig::default(), Console::global()));

/// A configuration bound to a console.
///
/// The macros write through [`Mini::global`]; separate instances are
/// useful to redirect output.
pub struct Mini {
    config: RwLock<Arc<MiniConfig>>,
    console: RwLock<Arc<Console>>,
    clock: Clock,
}

impl fmt::Debug for Mini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mini")
            .field("config", &self.config())
            .field("console", &self.console())
            .finish()
    }
}

impl Mini {
    pub fn new(config: MiniConfig, console: Arc<Console>) -> Self {
        Self {
            config: RwLock::new(Arc::new(config)),
            console: RwLock::new(console),
            clock: system_clock(),
        }
    }

    /// The process-wide instance used by the macros.
    pub fn global() -> &'static Mini {
        &GLOBAL
    }

    pub fn config(&self) -> Arc<MiniConfig> {
        Arc::clone(&self.config.read().unwrap_or_else(|e| e.into_inner()))
    }

    pub fn set_config(&self, config: MiniConfig) {
        *self.config.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(config);
    }

    pub fn console(&self) -> Arc<Console> {
        Arc::clone(&self.console.read().unwrap_or_else(|e| e.into_inner()))
    }

    /// Redirects output to `console`.
    pub fn set_console(&self, console: Arc<Console>) {
        *self.console.write().unwrap_or_else(|e| e.into_inner()) = console;
    }

    pub fn enabled(&self, level: MiniLevel) -> bool {
        level >= self.config().min_level
    }

    fn colors(&self, config: &MiniConfig, console: &Console) -> bool {
        config.color && console.colors()
    }

    /// Writes `[ts][LEVEL] : message` unless `level` is below the minimum.
    pub fn write(&self, level: MiniLevel, args: fmt::Arguments<'_>) {
        let config = self.config();
        if level < config.min_level {
            return;
        }
        let console = self.console();
        let stamp = if config.timestamp {
            (self.clock)().format(TIMESTAMP_FORMAT).to_string()
        } else {
            String::new()
        };
        let line = format_line(level, &stamp, args, self.colors(&config, &console));
        console.write_str(level.stream(), &line);
    }

    /// Logs `[TEST][PASS] : expr` or `[TEST][FAIL] : expr`; returns `cond`.
    pub fn test_case(&self, cond: bool, expr: &str) -> bool {
        let config = self.config();
        let console = self.console();
        let colors = self.colors(&config, &console);

        let verdict = if cond {
            Style::new().foreground(AnsiFore::Green).render_with(&config.pass_text, colors)
        } else {
            Style::new().foreground(AnsiFore::Red).render_with(&config.fail_text, colors)
        };
        let tag = Style::new().foreground(AnsiFore::Blue).render_with("[TEST]", colors);
        console.write_str(Stream::Stdout, &format!("{tag}{verdict}{SEPARATOR}{expr}\n"));
        cond
    }

    /// Logs the fatal assertion line for `expr`.
    pub fn assert_failure(&self, expr: &str) {
        let colors = {
            let config = self.config();
            let console = self.console();
            self.colors(&config, &console)
        };
        let marker = Style::new()
            .foreground(AnsiFore::Red)
            .reverse()
            .render_with("[ASSERT][FAILURE]", colors);
        self.write(MiniLevel::Fatal, format_args!("{marker}{SEPARATOR}{expr}"));
    }

    /// Writes the terminal reset sequence.
    pub fn reset_terminal(&self) {
        self.console().write_str(Stream::Stdout, "\x1b[0m\n");
    }

    pub(crate) fn scope_marker(&self, enter: bool) -> String {
        let config = self.config();
        let colors = self.colors(&config, &self.console());
        if !colors {
            return if enter {
                config.scope_enter_text.clone()
            } else {
                config.scope_leave_text.clone()
            };
        }
        if enter {
            colorize(AnsiFore::LightGreen, &config.scope_enter_text)
        } else {
            colorize(AnsiFore::LightRed, &config.scope_leave_text)
        }
    }
}

/// Assembles one mini line, newline included. The color spans the stamp and
/// the label.
pub fn format_line(level: MiniLevel, stamp: &str, args: fmt::Arguments<'_>, colors: bool) -> String {
    let head = format!("{stamp}{}", level.label());
    format!("{}{SEPARATOR}{args}\n", level.style().render_with(&head, colors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp_log::Capture;

    fn mini(config: MiniConfig) -> (Mini, Capture) {
        let (console, capture) = Console::capture();
        (Mini::new(config, console), capture)
    }

    #[test]
    fn line_layout() {
        assert_eq!(
            format_line(MiniLevel::Info, "", format_args!("x = {}", 1), false),
            "[INFO]  : x = 1\n"
        );
        assert_eq!(
            format_line(MiniLevel::Error, "[12:00:00]", format_args!("e"), false),
            "[12:00:00][ERROR] : e\n"
        );
        assert_eq!(
            format_line(MiniLevel::Debug, "", format_args!("d"), true),
            "\x1b[36m[DEBUG]\x1b[0m : d\n"
        );
    }

    #[test]
    fn routes_by_level() {
        let (m, capture) = mini(MiniConfig::default().min_level(MiniLevel::Trace));
        m.write(MiniLevel::Trace, format_args!("t"));
        m.write(MiniLevel::Info, format_args!("i"));
        m.write(MiniLevel::Warn, format_args!("w"));
        m.write(MiniLevel::Fatal, format_args!("f"));
        assert_eq!(capture.stdout_lines(), vec!["[TRACE] : t", "[INFO]  : i"]);
        assert_eq!(capture.stderr_lines(), vec!["[WARN]  : w", "[FATAL] : f"]);
    }

    #[test]
    fn below_minimum_dropped() {
        let (m, capture) = mini(MiniConfig::default().min_level(MiniLevel::Warn));
        assert!(!m.enabled(MiniLevel::Info));
        m.write(MiniLevel::Info, format_args!("dropped"));
        assert!(capture.stdout().is_empty());
    }

    #[test]
    fn timestamp_prefix() {
        let (m, capture) = mini(MiniConfig::default().timestamp(true).min_level(MiniLevel::Trace));
        m.write(MiniLevel::Info, format_args!("now"));
        let line = &capture.stdout_lines()[0];
        assert_eq!(line.len(), "[HH:MM:SS][INFO]  : now".len());
        assert!(line[10..].starts_with("[INFO] "));
    }

    #[test]
    fn color_needs_both_switches() {
        let (m, capture) = mini(MiniConfig::default().min_level(MiniLevel::Trace));
        m.console().set_colors(true);
        m.write(MiniLevel::Info, format_args!("c"));
        m.set_config(MiniConfig::default().color(false).min_level(MiniLevel::Trace));
        m.write(MiniLevel::Info, format_args!("p"));
        assert_eq!(
            capture.stdout_lines(),
            vec!["\x1b[32m[INFO] \x1b[0m : c", "[INFO]  : p"]
        );
    }

    #[test]
    fn test_case_lines() {
        let (m, capture) = mini(MiniConfig::default());
        assert!(m.test_case(true, "1 + 1 == 2"));
        assert!(!m.test_case(false, "2 < 1"));
        assert_eq!(
            capture.stdout_lines(),
            vec!["[TEST][PASS] : 1 + 1 == 2", "[TEST][FAIL] : 2 < 1"]
        );
    }

    #[test]
    fn custom_pass_text() {
        let (m, capture) = mini(MiniConfig::default().pass_fail_text("ok", "ko"));
        m.test_case(true, "x");
        assert_eq!(capture.stdout(), "[TEST]ok : x\n");
    }

    #[test]
    fn assert_failure_line() {
        let (m, capture) = mini(MiniConfig::default().min_level(MiniLevel::Info));
        m.assert_failure("a == b");
        assert_eq!(capture.stderr(), "[FATAL] : [ASSERT][FAILURE] : a == b\n");
    }

    #[test]
    fn reset_sequence() {
        let (m, capture) = mini(MiniConfig::default());
        m.reset_terminal();
        assert_eq!(capture.stdout(), "\x1b[0m\n");
    }

    #[test]
    fn redirect_console() {
        let (m, first) = mini(MiniConfig::default().min_level(MiniLevel::Trace));
        let (console, second) = Console::capture();
        m.set_console(console);
        m.write(MiniLevel::Info, format_args!("moved"));
        assert!(first.stdout().is_empty());
        assert_eq!(second.stdout(), "[INFO]  : moved\n");
    }
}
