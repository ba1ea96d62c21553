use std::fmt;
use std::sync::Arc;

use warp_log::{Console, Logger, Tag};
use warp_style::AnsiFore;

use crate::summary::Summary;

/// A group of cases reported under one heading.
///
/// ```rust
/// use warp_log::Console;
/// use warp_test::Suite;
///
/// let (console, capture) = Console::capture();
/// let mut suite = Suite::with_console("arithmetic", console);
/// suite.check(1 + 1 == 2, "addition");
/// suite.check_eq(2 * 3, 7, "multiplication");
/// let summary = suite.finish();
///
/// assert_eq!(summary.failed(), 1);
/// assert_eq!(capture.stdout_lines(), vec![
///     "\t\t[SUITE] : arithmetic",
///     "\t\t\t[CASE][PASS] : addition",
///     "\t\t\t[CASE][FAIL] : multiplication (actual: 6, expected: 7)",
///     "\t\t[SUITE] : [1/2]",
/// ]);
/// ```
#[derive(Debug)]
pub struct Suite {
    desc: String,
    summary: Summary,
    logger: Logger,
    cases: Logger,
    finished: bool,
}

impl Suite {
    /// Starts a suite on the global console.
    pub fn new(desc: impl Into<String>) -> Self {
        Self::with_console(desc, Console::global())
    }

    pub fn with_console(desc: impl Into<String>, console: Arc<Console>) -> Self {
        let desc = desc.into();
        let logger = Logger::from_tags(vec![
            Tag::plain("\t\t"),
            Tag::colored(AnsiFore::Blue, "[SUITE]"),
        ])
        .with_console(Arc::clone(&console));
        let cases = Logger::from_tags(vec![
            Tag::plain("\t\t\t"),
            Tag::colored(AnsiFore::Blue, "[CASE]"),
        ])
        .with_console(console);

        logger.print(&desc);
        Self {
            desc,
            summary: Summary::new(),
            logger,
            cases,
            finished: false,
        }
    }

    pub fn description(&self) -> &str {
        &self.desc
    }

    /// Records and logs one case; returns `cond`.
    pub fn check(&mut self, cond: bool, desc: impl fmt::Display) -> bool {
        self.summary.add_case(cond);

        let verdict = if cond {
            Tag::colored(AnsiFore::Green, "[PASS]")
        } else {
            Tag::colored(AnsiFore::Red, "[FAIL]")
        };
        let console = self.cases.console();
        let mut prefix = self.cases.context().to_string();
        prefix.push_str(&verdict.render(console.colors()));
        console.print_line(&prefix, &desc.to_string());
        cond
    }

    /// Passes when `actual == expected`; a failure shows both values.
    pub fn check_eq<A, E>(&mut self, actual: A, expected: E, desc: impl fmt::Display) -> bool
    where
        A: PartialEq<E> + fmt::Debug,
        E: fmt::Debug,
    {
        if actual == expected {
            self.check(true, desc)
        } else {
            self.check(
                false,
                format_args!("{desc} (actual: {actual:?}, expected: {expected:?})"),
            )
        }
    }

    /// Passes when `actual != expected`.
    pub fn check_ne<A, E>(&mut self, actual: A, expected: E, desc: impl fmt::Display) -> bool
    where
        A: PartialEq<E> + fmt::Debug,
        E: fmt::Debug,
    {
        if actual == expected {
            self.check(false, format_args!("{desc} (both: {actual:?})"))
        } else {
            self.check(true, desc)
        }
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Logs the closing summary and returns it.
    pub fn finish(mut self) -> Summary {
        self.close();
        self.summary
    }

    fn close(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        tracing::debug!(
            suite = %self.desc,
            passed = self.summary.passed(),
            total = self.summary.total(),
            "suite finished"
        );
        let colors = self.logger.console().colors();
        self.logger.print(self.summary.render(colors));
    }
}

impl Drop for Suite {
    fn drop(&mut self) {
        self.close();
    }
}

/// Records `actual == expected`, described by the expressions themselves.
///
/// ```rust
/// use warp_log::Console;
/// use warp_test::{Suite, test_eq};
///
/// let (console, capture) = Console::capture();
/// let mut suite = Suite::with_console("macros", console);
/// test_eq!(suite, 2 + 2, 4);
/// assert!(capture.stdout().contains("[CASE][PASS] : 2 + 2 == 4"));
/// ```
#[macro_export]
macro_rules! test_eq {
    ($suite:expr, $actual:expr, $expected:expr $(,)?) => {
        $suite.check_eq(
            &$actual,
            &$expected,
            concat!(stringify!($actual), " == ", stringify!($expected)),
        )
    };
}

/// Records `actual != expected`, described by the expressions themselves.
#[macro_export]
macro_rules! test_ne {
    ($suite:expr, $actual:expr, $expected:expr $(,)?) => {
        $suite.check_ne(
            &$actual,
            &$expected,
            concat!(stringify!($actual), " != ", stringify!($expected)),
        )
    };
}
