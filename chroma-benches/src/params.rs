//! Benchmark parameter types.
//!
//! Each type renders as the Criterion parameter label of one benchmark input.

use std::fmt;

/// Parameters for a minimum spanning forest benchmark run.
#[derive(Clone, Debug)]
pub struct MsfBenchParams {
    /// Number of node ids in the graph.
    pub node_count: u64,
    /// Number of generated edges.
    pub edge_count: usize,
}

impl fmt::Display for MsfBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},e={}", self.node_count, self.edge_count)
    }
}

/// Parameters for a unitig construction benchmark run.
#[derive(Clone, Debug)]
pub struct UnitigBenchParams {
    /// Length of the synthetic genome.
    pub genome_len: usize,
    /// K-mer length.
    pub k: usize,
}

impl fmt::Display for UnitigBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "len={},k={}", self.genome_len, self.k)
    }
}
