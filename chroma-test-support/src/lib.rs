//! Shared test utilities used across chroma crates.

pub mod ci;
pub mod fixtures;
pub mod tracing;
