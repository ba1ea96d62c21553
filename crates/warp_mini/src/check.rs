//! One-line tests and fatal assertions.

use crate::sink::Mini;

/// Logs a test case on the global instance; returns `cond`.
pub fn test_case(cond: bool, expr: &str) -> bool {
    Mini::global().test_case(cond, expr)
}

/// Logs the fatal assertion line and aborts the process.
#[cold]
pub fn assert_failed(expr: &str) -> ! {
    Mini::global().assert_failure(expr);
    tracing::error!(expr, "assertion failed, aborting");
    std::process::abort()
}

/// Logs `[TEST][PASS] : cond` or `[TEST][FAIL] : cond` and evaluates to the
/// condition.
#[macro_export]
macro_rules! wtest {
    ($cond:expr $(,)?) => {
        $crate::check::test_case($cond, ::std::stringify!($cond))
    };
}

/// [`wtest!`] on `actual == expected`.
#[macro_export]
macro_rules! wtest_eq {
    ($actual:expr, $expected:expr $(,)?) => {
        $crate::check::test_case(
            ($actual) == ($expected),
            ::std::concat!(::std::stringify!($actual), " == ", ::std::stringify!($expected)),
        )
    };
}

/// [`wtest!`] on `actual != expected`.
#[macro_export]
macro_rules! wtest_ne {
    ($actual:expr, $expected:expr $(,)?) => {
        $crate::check::test_case(
            ($actual) != ($expected),
            ::std::concat!(::std::stringify!($actual), " != ", ::std::stringify!($expected)),
        )
    };
}

/// Aborts the process with a fatal `[ASSERT][FAILURE]` line when `cond` is
/// false.
#[macro_export]
macro_rules! wassert {
    ($cond:expr $(,)?) => {
        if !($cond) {
            $crate::check::assert_failed(::std::stringify!($cond));
        }
    };
}

/// [`wassert!`] on `actual == expected`.
#[macro_export]
macro_rules! wassert_eq {
    ($actual:expr, $expected:expr $(,)?) => {
        if ($actual) != ($expected) {
            $crate::check::assert_failed(::std::concat!(
                ::std::stringify!($actual),
                " == ",
                ::std::stringify!($expected)
            ));
        }
    };
}

/// [`wassert!`] on `actual != expected`.
#[macro_export]
macro_rules! wassert_ne {
    ($actual:expr, $expected:expr $(,)?) => {
        if ($actual) == ($expected) {
            $crate::check::assert_failed(::std::concat!(
                ::std::stringify!($actual),
                " != ",
                ::std::stringify!($expected)
            ));
        }
    };
}
