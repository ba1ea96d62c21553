#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]

//! # Warp Test
//!
//! A small harness for self-checking programs, printing through
//! [`warp_log`]:
//!
//! ```text
//! [REGISTRY]
//!     [COLLECTION] : parsing
//!         [SUITE] : numbers
//!             [CASE][PASS] : parse("1") == 1
//!             [CASE][FAIL] : parse("x") == 0 (actual: None, expected: Some(0))
//!         [SUITE] : [1/2]
//!     [COLLECTION] : [1/2]
//! [REGISTRY] : [1/2]
//! ```
//!
//! A [`Suite`] records cases into a [`Summary`]; a [`Registry`] runs named
//! collections of suite functions and turns the total into an exit code.

pub mod registry;
pub mod suite;
pub mod summary;

pub use registry::{Registry, SuiteFn};
pub use suite::Suite;
pub use summary::Summary;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{Registry, Suite, SuiteFn, Summary, test_eq, test_ne};
}
