//! Weighted disjoint-set forest used by the bucketed MSF builder.
//!
//! Each root accumulates the total weight and count of the edges merged into
//! its tree. When a root is absorbed its statistics flow into the absorbing
//! root and are zeroed, so at any time the statistics of a tree live only on
//! its current root.
//!
//! Every absorbed node also records the id of the root that absorbed it. That
//! provenance is kept apart from the live `parent` pointer and is never
//! followed by [`DisjointSets::find`].

use crate::error::ForestError;

/// Per-node state of the forest.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DisjointSetNode {
    parent: u64,
    real_parent: u64,
    rank: u64,
    weight: u64,
    edges: u64,
}

impl DisjointSetNode {
    const fn singleton(id: u64) -> Self {
        Self {
            parent: id,
            real_parent: id,
            rank: 0,
            weight: 0,
            edges: 0,
        }
    }

    /// Current forest parent; equals the node's own id for roots.
    #[must_use]
    #[rustfmt::skip]
    pub const fn parent(&self) -> u64 { self.parent }

    /// Id of the root that absorbed this node, or its own id if never absorbed.
    #[must_use]
    #[rustfmt::skip]
    pub const fn real_parent(&self) -> u64 { self.real_parent }

    /// Union-by-rank height bound.
    #[must_use]
    #[rustfmt::skip]
    pub const fn rank(&self) -> u64 { self.rank }

    /// Accumulated edge weight of the tree rooted here (zero on non-roots).
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> u64 { self.weight }

    /// Number of edges merged into the tree rooted here (zero on non-roots).
    #[must_use]
    #[rustfmt::skip]
    pub const fn edges(&self) -> u64 { self.edges }

    fn absorb(&mut self, child: &mut Self, absorber_id: u64, edge_weight: u32) {
        self.weight += child.weight + u64::from(edge_weight);
        self.edges += child.edges + 1;
        child.weight = 0;
        child.edges = 0;
        child.parent = absorber_id;
        child.real_parent = absorber_id;
    }
}

/// Statistics reported for one surviving root.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ComponentSummary {
    /// Root node id.
    pub root: u64,
    /// Number of edges merged into the component.
    pub edges: u64,
    /// Total weight of the merged edges.
    pub weight: u64,
    /// Rank of the root.
    pub rank: u64,
}

/// A forest over node ids `0..=node_count`.
///
/// Id 0 is allocated but unused by the 1-indexed edge files.
///
/// # Examples
/// ```
/// use chroma_core::DisjointSets;
///
/// let mut forest = DisjointSets::new(3);
/// let (a, b) = (forest.find(1), forest.find(2));
/// forest.merge(a, b, 4)?;
/// assert_eq!(forest.find(1), forest.find(2));
///
/// let root = forest.find(1);
/// assert_eq!(forest.node(root).map(|node| node.weight()), Some(4));
/// # Ok::<(), chroma_core::ForestError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSets {
    nodes: Vec<DisjointSetNode>,
}

impl DisjointSets {
    /// Creates `node_count + 1` singleton trees.
    #[must_use]
    pub fn new(node_count: u64) -> Self {
        Self {
            nodes: (0..=node_count).map(DisjointSetNode::singleton).collect(),
        }
    }

    /// Highest valid node id.
    #[must_use]
    pub fn node_count(&self) -> u64 {
        self.nodes.len().saturating_sub(1) as u64
    }

    /// Returns the state of `id`, or `None` when it is out of range.
    #[must_use]
    pub fn node(&self, id: u64) -> Option<&DisjointSetNode> {
        usize::try_from(id).ok().and_then(|index| self.nodes.get(index))
    }

    /// Returns the provenance back-reference of `id`.
    #[must_use]
    pub fn real_parent(&self, id: u64) -> Option<u64> {
        self.node(id).map(DisjointSetNode::real_parent)
    }

    /// Returns `true` when `id` is the root of its tree.
    #[must_use]
    pub fn is_root(&self, id: u64) -> bool {
        self.node(id).is_some_and(|node| node.parent == id)
    }

    /// Returns the root of `u`'s tree, pointing every node on the path
    /// directly at that root.
    ///
    /// # Panics
    /// Panics when `u` exceeds [`Self::node_count`].
    pub fn find(&mut self, u: u64) -> u64 {
        let mut root = u;
        while self.nodes[slot(root)].parent != root {
            root = self.nodes[slot(root)].parent;
        }

        let mut node = u;
        while node != root {
            let next = self.nodes[slot(node)].parent;
            self.nodes[slot(node)].parent = root;
            node = next;
        }

        root
    }

    /// Returns the root of `u`, or an error when `u` is out of range.
    ///
    /// # Errors
    /// Returns [`ForestError::NodeOutOfRange`] for ids past
    /// [`Self::node_count`].
    pub fn try_find(&mut self, u: u64) -> Result<u64, ForestError> {
        self.check_range(u)?;
        Ok(self.find(u))
    }

    /// Merges two distinct roots joined by an edge of `edge_weight`.
    ///
    /// The lower-rank root is absorbed. On equal ranks `y` is absorbed into
    /// `x` and the rank of `x` grows by one.
    ///
    /// # Errors
    /// Returns [`ForestError::SelfMerge`] when `x == y`,
    /// [`ForestError::NotARoot`] when either argument is not a root, and
    /// [`ForestError::NodeOutOfRange`] for ids past [`Self::node_count`].
    pub fn merge(&mut self, x: u64, y: u64, edge_weight: u32) -> Result<u64, ForestError> {
        self.check_range(x)?;
        self.check_range(y)?;
        if x == y {
            return Err(ForestError::SelfMerge { root: x });
        }
        for id in [x, y] {
            let parent = self.nodes[slot(id)].parent;
            if parent != id {
                let root = self.find(id);
                return Err(ForestError::NotARoot { node: id, root });
            }
        }

        let x_rank = self.nodes[slot(x)].rank;
        let y_rank = self.nodes[slot(y)].rank;
        let (absorber, absorbed) = if y_rank > x_rank { (y, x) } else { (x, y) };

        let mut child = self.nodes[slot(absorbed)];
        let owner = &mut self.nodes[slot(absorber)];
        owner.absorb(&mut child, absorber, edge_weight);
        if x_rank == y_rank {
            owner.rank += 1;
        }
        self.nodes[slot(absorbed)] = child;
        Ok(absorber)
    }

    /// Iterates over every node in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &DisjointSetNode)> + '_ {
        (0_u64..).zip(self.nodes.iter())
    }

    /// Summaries for every root with nonzero accumulated weight, ascending by id.
    pub fn weighted_roots(&self) -> impl Iterator<Item = ComponentSummary> + '_ {
        self.iter()
            .filter(|(_, node)| node.weight != 0)
            .map(|(root, node)| ComponentSummary {
                root,
                edges: node.edges,
                weight: node.weight,
                rank: node.rank,
            })
    }

    /// Number of trees among ids `1..=node_count`.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.iter()
            .skip(1)
            .filter(|(id, node)| node.parent == *id)
            .count()
    }

    /// Sum of the weights accumulated on all roots.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.nodes.iter().map(|node| node.weight).sum()
    }

    /// Sum of the edge counts accumulated on all roots.
    #[must_use]
    pub fn total_merges(&self) -> u64 {
        self.nodes.iter().map(|node| node.edges).sum()
    }

    fn check_range(&self, id: u64) -> Result<(), ForestError> {
        if self.node(id).is_none() {
            return Err(ForestError::NodeOutOfRange {
                node: id,
                node_count: self.node_count(),
            });
        }
        Ok(())
    }
}

// Node ids index an in-memory Vec, so they always fit in usize.
const fn slot(id: u64) -> usize {
    id as usize
}
