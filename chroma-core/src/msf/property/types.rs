//! Fixture types for MSF property tests.

/// Shape of the generated graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum GraphShape {
    /// Random spanning tree plus a few extra edges.
    Sparse,
    /// Most node pairs are connected.
    Dense,
    /// Every edge shares the lowest weight, so one bucket holds everything.
    SingleBucket,
    /// Several components with no edges between them.
    Disconnected,
}

/// A generated graph ready to be loaded into a bucketed graph.
#[derive(Clone, Debug)]
pub(super) struct MsfFixture {
    /// Highest node id; ids start at 1 as in edge files.
    pub node_count: u64,
    /// Number of weight buckets.
    pub bucket_count: usize,
    /// Edges as `(n1, n2, weight)` in insertion order.
    pub edges: Vec<(u64, u64, u32)>,
    /// Shape used during generation.
    pub shape: GraphShape,
}
