//! Benchmark support crate for chroma.
//!
//! Provides seeded synthetic inputs and parameter types used by the Criterion
//! benchmarks for the two compaction stages: bucketed Kruskal over a weighted
//! edge list and unitig construction over a k-mer membership oracle.

pub mod error;
pub mod params;
pub mod source;
