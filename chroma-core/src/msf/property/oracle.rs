//! Comparison-sort Kruskal used as a reference for property tests.

use super::types::MsfFixture;

/// Totals produced by the reference implementation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct ReferenceForest {
    /// Sum of accepted edge weights.
    pub total_weight: u64,
    /// Number of accepted edges.
    pub edge_count: u64,
    /// Representative of each node id `0..=node_count`.
    pub component_of: Vec<usize>,
}

/// Sorts all edges by weight and runs textbook Kruskal.
pub(super) fn reference_kruskal(fixture: &MsfFixture) -> ReferenceForest {
    let size = node_index(fixture.node_count) + 1;
    let mut parent: Vec<usize> = (0..size).collect();
    let mut edges = fixture.edges.clone();
    edges.sort_by_key(|&(_, _, weight)| weight);

    let mut total_weight = 0;
    let mut edge_count = 0;
    for (n1, n2, weight) in edges {
        let left = find(&mut parent, node_index(n1));
        let right = find(&mut parent, node_index(n2));
        if left != right {
            parent[right] = left;
            total_weight += u64::from(weight);
            edge_count += 1;
        }
    }

    let component_of = (0..size).map(|node| find(&mut parent, node)).collect();
    ReferenceForest {
        total_weight,
        edge_count,
        component_of,
    }
}

fn find(parent: &mut [usize], mut node: usize) -> usize {
    while parent[node] != node {
        parent[node] = parent[parent[node]];
        node = parent[node];
    }
    node
}

fn node_index(node: u64) -> usize {
    usize::try_from(node).unwrap_or_else(|_| panic!("node {node} must fit in usize"))
}
