//! Test helpers module
//!
//! Mock backend and fixture data shared by the integration tests.

#![allow(dead_code)]

pub mod backend_mock;
pub mod test_data;

pub use backend_mock::*;
pub use test_data::*;
