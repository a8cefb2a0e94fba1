//! Test helpers module
//!
//! Shared setup for the integration tests: an identity service mock, a
//! unified test context over the in-memory store, and test data.

#![allow(dead_code)]

pub mod identity_mock;
pub mod test_context;
pub mod test_data;

pub use identity_mock::*;
pub use test_context::*;
pub use test_data::*;
