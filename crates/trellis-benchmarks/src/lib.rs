//! Trellis benchmarking suite
//!
//! Benchmarks for description decoding and manifest synthesis.

pub mod common;
pub mod fixtures;

pub use common::*;
pub use fixtures::*;
