//! Trinary library
//!
//! Gravity simulation of a hierarchical triple star with a planet. The
//! physics core lives in [`physics`]; [`simulation`] drives it frame by frame
//! the way a renderer would.

pub mod cli;
pub mod config;
pub mod physics;
pub mod prelude;
pub mod resources;
pub mod simulation;

// Test utilities are public for integration tests
pub mod test_utils;
