//! Test utilities
//!
//! Manual in-memory persistence and test fixtures for unit testing.
//!
//! Why manual mocks instead of mockall?
//! - The unit of work hands out `&dyn` repositories that share staged state,
//!   which expectation-based mocks cannot model
//! - Tests assert on effects (rows, round trips, open transactions), not calls
//!
//! The router tests in `handlers` run against the same in-memory unit of work,
//! since `AppState` is generic over the unit-of-work factory.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
