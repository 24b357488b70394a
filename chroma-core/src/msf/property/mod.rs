//! Property-based tests for the bucketed Kruskal builder.
//!
//! Checks the builder against a comparison-sort Kruskal oracle, verifies that
//! per-root statistics are conserved, that roots partition nodes exactly as
//! the input's connected components do, and that shuffling edges inside a
//! bucket never changes the forest's total weight.

mod oracle;
mod properties;
mod strategies;
mod types;
