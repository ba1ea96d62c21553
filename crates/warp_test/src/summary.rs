//! Pass/fail counters.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use warp_style::{AnsiFore, Style};

/// Counts of evaluated and passed cases. `passed <= total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Summary {
    total: u64,
    passed: u64,
}

impl Summary {
    pub const fn new() -> Self {
        Self { total: 0, passed: 0 }
    }

    /// Records one case.
    pub fn add_case(&mut self, passed: bool) {
        self.total += 1;
        self.passed += u64::from(passed);
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn passed(&self) -> u64 {
        self.passed
    }

    pub fn failed(&self) -> u64 {
        self.total - self.passed
    }

    /// True when no case failed (including when there were none).
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// `[passed/total]`, yellow when `colors` is set.
    pub fn render(&self, colors: bool) -> String {
        Style::new()
            .foreground(AnsiFore::Yellow)
            .render_with(&self.to_string(), colors)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}/{}]", self.passed, self.total)
    }
}

impl AddAssign for Summary {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.passed += other.passed;
    }
}

impl Add for Summary {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl Sum for Summary {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(), Add::add)
    }
}
