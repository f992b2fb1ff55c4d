//! Test infrastructure for the OVSDB management crates
//!
//! Provides:
//! - A scripted command runner standing in for the OVS/OVN tools
//! - Fixtures for query JSON and control-socket status reports
//! - Assertion helpers over the commands that were run

pub mod fixtures;
mod mock_runner;
mod verification;

pub use fixtures::*;
pub use mock_runner::{Invocation, MockRunner};
pub use verification::*;
