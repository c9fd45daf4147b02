//! CLI command implementations.

pub mod common;
pub mod generate;
pub mod synthesize;
pub mod version;
