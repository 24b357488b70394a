//! Property runners shared by the proptest and rstest suites.

use proptest::test_runner::{TestCaseError, TestCaseResult};
use rand::Rng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::error::GraphError;
use crate::msf::{BucketedGraph, MinimumSpanningForest};

use super::oracle::reference_kruskal;
use super::types::MsfFixture;

fn build(fixture: &MsfFixture, edges: &[(u64, u64, u32)]) -> Result<MinimumSpanningForest, TestCaseError> {
    let context = || {
        format!(
            "shape={:?}, nodes={}, edges={}",
            fixture.shape,
            fixture.node_count,
            edges.len()
        )
    };
    let mut graph = BucketedGraph::new(fixture.node_count, fixture.bucket_count)
        .map_err(|err| TestCaseError::fail(format!("graph rejected: {err} ({})", context())))?;
    for &(n1, n2, weight) in edges {
        graph
            .add_edge(n1, n2, weight)
            .map_err(|err| TestCaseError::fail(format!("edge rejected: {err} ({})", context())))?;
    }
    // Any attempt to merge a root with itself surfaces here as an error.
    graph
        .kruskal_msf()
        .map_err(|err| TestCaseError::fail(format!("kruskal failed: {err} ({})", context())))
}

/// Bucketed Kruskal must accept the same weight and edge count as a
/// comparison-sort Kruskal.
pub(super) fn run_reference_equivalence_property(fixture: &MsfFixture) -> TestCaseResult {
    let msf = build(fixture, &fixture.edges)?;
    let reference = reference_kruskal(fixture);

    if msf.forest().total_weight() != reference.total_weight {
        return Err(TestCaseError::fail(format!(
            "total weight mismatch: bucketed={}, reference={} (shape={:?})",
            msf.forest().total_weight(),
            reference.total_weight,
            fixture.shape,
        )));
    }
    if msf.stats().merges != reference.edge_count {
        return Err(TestCaseError::fail(format!(
            "merge count mismatch: bucketed={}, reference={} (shape={:?})",
            msf.stats().merges,
            reference.edge_count,
            fixture.shape,
        )));
    }
    Ok(())
}

/// Statistics live only on roots and sum to the merged totals.
pub(super) fn run_conservation_property(fixture: &MsfFixture) -> TestCaseResult {
    let msf = build(fixture, &fixture.edges)?;
    let forest = msf.forest();

    for (id, node) in forest.iter() {
        let is_root = node.parent() == id;
        if !is_root && (node.weight() != 0 || node.edges() != 0) {
            return Err(TestCaseError::fail(format!(
                "non-root {id} carries weight={} edges={}",
                node.weight(),
                node.edges(),
            )));
        }
    }

    let summed_edges: u64 = forest.weighted_roots().map(|summary| summary.edges).sum();
    let summed_weight: u64 = forest.weighted_roots().map(|summary| summary.weight).sum();
    let merged_weight = reference_kruskal(fixture).total_weight;

    if summed_edges != msf.stats().merges {
        return Err(TestCaseError::fail(format!(
            "root edge counts sum to {summed_edges}, but {} merges happened",
            msf.stats().merges,
        )));
    }
    if summed_weight != merged_weight {
        return Err(TestCaseError::fail(format!(
            "root weights sum to {summed_weight}, but merged edges weigh {merged_weight}",
        )));
    }
    Ok(())
}

/// Two nodes share a root exactly when they share a connected component.
pub(super) fn run_partition_property(fixture: &MsfFixture) -> TestCaseResult {
    let mut forest = build(fixture, &fixture.edges)?.into_forest();
    let reference = reference_kruskal(fixture);
    let roots: Vec<u64> = (0..=fixture.node_count).map(|id| forest.find(id)).collect();

    for left in 0..roots.len() {
        for right in (left + 1)..roots.len() {
            let same_root = roots[left] == roots[right];
            let same_component = reference.component_of[left] == reference.component_of[right];
            if same_root != same_component {
                return Err(TestCaseError::fail(format!(
                    "nodes {left} and {right}: same_root={same_root}, \
                     same_component={same_component} (shape={:?})",
                    fixture.shape,
                )));
            }
        }
    }
    Ok(())
}

/// Reordering edges inside their buckets leaves the total weight unchanged.
pub(super) fn run_bucket_order_property(fixture: &MsfFixture, rng: &mut SmallRng) -> TestCaseResult {
    let baseline = build(fixture, &fixture.edges)?;
    let mut shuffled = fixture.edges.clone();
    shuffled.shuffle(rng);
    let reordered = build(fixture, &shuffled)?;

    if baseline.forest().total_weight() != reordered.forest().total_weight() {
        return Err(TestCaseError::fail(format!(
            "total weight changed after shuffling: {} vs {} (shape={:?})",
            baseline.forest().total_weight(),
            reordered.forest().total_weight(),
            fixture.shape,
        )));
    }
    if baseline.stats().merges != reordered.stats().merges {
        return Err(TestCaseError::fail(format!(
            "merge count changed after shuffling: {} vs {}",
            baseline.stats().merges,
            reordered.stats().merges,
        )));
    }
    Ok(())
}

/// Repeated edges, reversed repeats and self-loops never reach the forest as
/// a merge of one root with itself; they are examined and discarded.
pub(super) fn run_redundant_edges_property(fixture: &MsfFixture, rng: &mut SmallRng) -> TestCaseResult {
    let mut edges = fixture.edges.clone();
    for &(n1, n2, weight) in &fixture.edges {
        let repeat = if rng.gen_bool(0.5) { (n2, n1, weight) } else { (n1, n2, weight) };
        edges.push(repeat);
    }
    for _ in 0..fixture.edges.len().max(1) {
        let node = rng.gen_range(1..=fixture.node_count);
        let weight = rng.gen_range(1..=fixture.bucket_count);
        edges.push((node, node, u32::try_from(weight).unwrap_or(1)));
    }
    edges.shuffle(rng);

    let mut graph = BucketedGraph::new(fixture.node_count, fixture.bucket_count)
        .map_err(|err| TestCaseError::fail(format!("graph rejected: {err}")))?;
    for &(n1, n2, weight) in &edges {
        graph
            .add_edge(n1, n2, weight)
            .map_err(|err| TestCaseError::fail(format!("edge rejected: {err}")))?;
    }
    let msf = match graph.kruskal_msf() {
        Ok(msf) => msf,
        Err(GraphError::Forest(err)) => {
            return Err(TestCaseError::fail(format!(
                "builder asked the forest for an invalid merge: {err} (shape={:?})",
                fixture.shape,
            )));
        }
        Err(err) => return Err(TestCaseError::fail(format!("kruskal failed: {err}"))),
    };

    let reference = reference_kruskal(fixture);
    if msf.stats().edges_examined != edges.len() as u64 {
        return Err(TestCaseError::fail(format!(
            "examined {} of {} edges",
            msf.stats().edges_examined,
            edges.len(),
        )));
    }
    if msf.stats().merges != reference.edge_count
        || msf.forest().total_weight() != reference.total_weight
    {
        return Err(TestCaseError::fail(format!(
            "redundant edges changed the forest: merges={} weight={}, reference merges={} weight={}",
            msf.stats().merges,
            msf.forest().total_weight(),
            reference.edge_count,
            reference.total_weight,
        )));
    }
    Ok(())
}
