//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Why manual mocks instead of mockall?
//! - mockall has lifetime issues with traits containing `&str` parameters
//! - Manual mocks are more explicit and easier to debug
//! - We control exactly what they return without macro magic
//!
//! The in-memory repository evaluates `FilterPredicate` and `SortKey`
//! itself, so service and HTTP tests exercise the real query semantics.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
