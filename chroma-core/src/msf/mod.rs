//! Bucketed Kruskal construction of a minimum spanning forest.
//!
//! Edge weights are small positive integers, so instead of sorting the edge
//! list the graph keeps one bucket per weight and Kruskal visits the buckets
//! in ascending order. Edges inside a bucket are processed in insertion order;
//! that order may change the shape of the forest but never its total weight.

mod edge_list;

use bitvec::vec::BitVec;
use tracing::{debug, info, instrument};

use crate::{error::GraphError, forest::DisjointSets};

pub use self::edge_list::{EdgeListSummary, read_edge_list};

/// Number of examined edges between progress events.
pub const PROGRESS_INTERVAL: u64 = 1_000_000;

/// An undirected weighted edge between two node ids.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Edge {
    n1: u64,
    n2: u64,
    weight: u32,
}

impl Edge {
    /// Creates a new edge.
    #[must_use]
    pub const fn new(n1: u64, n2: u64, weight: u32) -> Self {
        Self { n1, n2, weight }
    }

    /// Returns the first endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn n1(&self) -> u64 { self.n1 }

    /// Returns the second endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn n2(&self) -> u64 { self.n2 }

    /// Returns the edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> u32 { self.weight }
}

/// Counters collected while building a forest.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MsfStats {
    /// Edges visited across all buckets.
    pub edges_examined: u64,
    /// Edges that joined two trees.
    pub merges: u64,
    /// Distinct endpoints of merged edges.
    pub distinct_nodes: u64,
}

/// The forest produced by [`BucketedGraph::kruskal_msf`] and its counters.
#[derive(Clone, Debug)]
pub struct MinimumSpanningForest {
    forest: DisjointSets,
    stats: MsfStats,
}

impl MinimumSpanningForest {
    /// Returns the completed forest.
    #[must_use]
    #[rustfmt::skip]
    pub const fn forest(&self) -> &DisjointSets { &self.forest }

    /// Returns the build counters.
    #[must_use]
    #[rustfmt::skip]
    pub const fn stats(&self) -> MsfStats { self.stats }

    /// Consumes the result, returning the forest.
    #[must_use]
    pub fn into_forest(self) -> DisjointSets {
        self.forest
    }
}

/// A graph whose edges are partitioned by weight into `1..=bucket_count`.
///
/// # Examples
/// ```
/// use chroma_core::BucketedGraph;
///
/// let mut graph = BucketedGraph::new(3, 2)?;
/// graph.add_edge(1, 2, 1)?;
/// graph.add_edge(2, 3, 1)?;
/// graph.add_edge(1, 3, 2)?;
///
/// let msf = graph.kruskal_msf()?;
/// let roots: Vec<_> = msf.forest().weighted_roots().collect();
/// assert_eq!(roots.len(), 1);
/// assert_eq!((roots[0].edges, roots[0].weight), (2, 2));
/// # Ok::<(), chroma_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct BucketedGraph {
    node_count: u64,
    buckets: Vec<Vec<Edge>>,
}

impl BucketedGraph {
    /// Creates an empty graph over node ids `0..=node_count`.
    ///
    /// # Errors
    /// Returns [`GraphError::ZeroBuckets`] when `bucket_count` is zero.
    pub fn new(node_count: u64, bucket_count: usize) -> Result<Self, GraphError> {
        if bucket_count == 0 {
            return Err(GraphError::ZeroBuckets);
        }
        Ok(Self {
            node_count,
            buckets: vec![Vec::new(); bucket_count],
        })
    }

    /// Highest valid node id.
    #[must_use]
    #[rustfmt::skip]
    pub const fn node_count(&self) -> u64 { self.node_count }

    /// Number of weight buckets.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of stored edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Returns the edges of weight `weight`, if that bucket exists.
    #[must_use]
    pub fn bucket(&self, weight: u32) -> Option<&[Edge]> {
        let index = usize::try_from(weight).ok()?.checked_sub(1)?;
        self.buckets.get(index).map(Vec::as_slice)
    }

    /// Files an edge under the bucket for its weight.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfRange`] when an endpoint exceeds the
    /// node count and [`GraphError::WeightOutOfRange`] when `weight` is not in
    /// `1..=bucket_count`.
    pub fn add_edge(&mut self, n1: u64, n2: u64, weight: u32) -> Result<(), GraphError> {
        for node in [n1, n2] {
            if node > self.node_count {
                return Err(GraphError::NodeOutOfRange {
                    node,
                    node_count: self.node_count,
                });
            }
        }

        let bucket_count = self.buckets.len();
        let bucket = usize::try_from(weight)
            .ok()
            .and_then(|value| value.checked_sub(1))
            .and_then(|index| self.buckets.get_mut(index))
            .ok_or(GraphError::WeightOutOfRange {
                n1,
                n2,
                weight,
                bucket_count,
            })?;
        bucket.push(Edge::new(n1, n2, weight));
        Ok(())
    }

    /// Runs Kruskal over the buckets in ascending weight order.
    ///
    /// An edge whose endpoints already share a root would close a cycle and is
    /// skipped. Merges are only ever requested for two distinct roots.
    ///
    /// # Errors
    /// Returns [`GraphError::Forest`] if the forest rejects a merge, which
    /// indicates a broken invariant rather than bad input.
    #[instrument(
        name = "msf.kruskal",
        err,
        skip(self),
        fields(nodes = self.node_count, edges = self.edge_count(), buckets = self.buckets.len()),
    )]
    pub fn kruskal_msf(&self) -> Result<MinimumSpanningForest, GraphError> {
        let mut forest = DisjointSets::new(self.node_count);
        let mut touched: BitVec = BitVec::repeat(false, node_slots(self.node_count));
        let mut stats = MsfStats::default();

        for edge in self.buckets.iter().flatten() {
            let root_1 = forest.try_find(edge.n1)?;
            let root_2 = forest.try_find(edge.n2)?;
            if root_1 != root_2 {
                forest.merge(root_1, root_2, edge.weight)?;
                touched.set(node_slot(edge.n1), true);
                touched.set(node_slot(edge.n2), true);
                stats.merges += 1;
            }

            stats.edges_examined += 1;
            if stats.edges_examined % PROGRESS_INTERVAL == 0 {
                debug!(
                    examined = stats.edges_examined,
                    merged = stats.merges,
                    "msf progress"
                );
            }
        }

        stats.distinct_nodes = touched.count_ones() as u64;
        record_metrics(&stats);
        info!(
            edges_examined = stats.edges_examined,
            merges = stats.merges,
            distinct_nodes = stats.distinct_nodes,
            "minimum spanning forest complete"
        );
        Ok(MinimumSpanningForest { forest, stats })
    }
}

#[cfg(feature = "metrics")]
fn record_metrics(stats: &MsfStats) {
    metrics::counter!("msf_edges_examined").increment(stats.edges_examined);
    metrics::counter!("msf_merges").increment(stats.merges);
}

#[cfg(not(feature = "metrics"))]
const fn record_metrics(_stats: &MsfStats) {}

// Endpoints are validated against `node_count` before they are stored.
const fn node_slot(node: u64) -> usize {
    node as usize
}

const fn node_slots(node_count: u64) -> usize {
    node_slot(node_count) + 1
}


#[cfg(test)]
mod property;
