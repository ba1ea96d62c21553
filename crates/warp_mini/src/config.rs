//! Mini logger settings, the `[mini]` table:
//!
//! ```toml
//! [mini]
//! color = true
//! timestamp = true
//! pass_text = "[OK]"
//! min_level = "info"
//! ```

use serde::{Deserialize, Serialize};

use crate::level::MiniLevel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MiniConfig {
    /// Emit color codes (still subject to the console's own color setting).
    pub color: bool,
    /// Prefix lines with `[HH:MM:SS]`.
    pub timestamp: bool,
    pub pass_text: String,
    pub fail_text: String,
    pub scope_enter_text: String,
    pub scope_leave_text: String,
    pub min_level: MiniLevel,
}

impl Default for MiniConfig {
    fn default() -> Self {
        Self {
            color: true,
            timestamp: false,
            pass_text: "[PASS]".to_string(),
            fail_text: "[FAIL]".to_string(),
            scope_enter_text: "--{".to_string(),
            scope_leave_text: "}--".to_string(),
            min_level: MiniLevel::DEFAULT_MIN,
        }
    }
}

impl MiniConfig {
    #[must_use]
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    #[must_use]
    pub fn timestamp(mut self, enabled: bool) -> Self {
        self.timestamp = enabled;
        self
    }

    #[must_use]
    pub fn min_level(mut self, level: MiniLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub fn pass_fail_text(mut self, pass: impl Into<String>, fail: impl Into<String>) -> Self {
        self.pass_text = pass.into();
        self.fail_text = fail.into();
        self
    }

    #[must_use]
    pub fn scope_text(mut self, enter: impl Into<String>, leave: impl Into<String>) -> Self {
        self.scope_enter_text = enter.into();
        self.scope_leave_text = leave.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MiniConfig::default();
        assert!(config.color);
        assert!(!config.timestamp);
        assert_eq!(config.pass_text, "[PASS]");
        assert_eq!(config.fail_text, "[FAIL]");
        assert_eq!(config.scope_enter_text, "--{");
        assert_eq!(config.scope_leave_text, "}--");
        assert_eq!(config.min_level, MiniLevel::DEFAULT_MIN);
    }

    #[test]
    fn partial_toml() {
        let config: MiniConfig = toml::from_str(
            r#"
            timestamp = true
            min_level = "warn"
            pass_text = "[OK]"
            "#,
        )
        .unwrap();
        assert!(config.timestamp);
        assert_eq!(config.min_level, MiniLevel::Warn);
        assert_eq!(config.pass_text, "[OK]");
        assert_eq!(config.fail_text, "[FAIL]");
    }

    #[test]
    fn builder() {
        let config = MiniConfig::default()
            .color(false)
            .scope_text(">>", "<<")
            .pass_fail_text("ok", "ko");
        assert!(!config.color);
        assert_eq!(config.scope_enter_text, ">>");
        assert_eq!(config.fail_text, "ko");
    }
}
