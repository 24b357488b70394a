//! Graph generators for MSF property tests.
//!
//! Node ids start at 1 and weights are drawn from `1..=bucket_count`, the
//! same ranges the edge-list reader accepts.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::types::{GraphShape, MsfFixture};

const MIN_NODES: u64 = 4;
const MAX_NODES: u64 = 48;
/// Dense graphs stay small to bound the quadratic pair loop.
const DENSE_MAX_NODES: u64 = 24;
const MAX_BUCKETS: usize = 8;

/// Generates fixtures across every graph shape.
pub(super) fn msf_fixture_strategy() -> impl Strategy<Value = MsfFixture> {
    (any::<GraphShape>(), any::<u64>()).prop_map(|(shape, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(shape, &mut rng)
    })
}

/// Generates a fixture of a chosen shape.
pub(super) fn generate_fixture(shape: GraphShape, rng: &mut SmallRng) -> MsfFixture {
    match shape {
        GraphShape::Sparse => generate_sparse(rng),
        GraphShape::Dense => generate_dense(rng),
        GraphShape::SingleBucket => generate_single_bucket(rng),
        GraphShape::Disconnected => generate_disconnected(rng),
    }
}

fn random_weight(rng: &mut SmallRng, bucket_count: usize) -> u32 {
    let weight = rng.gen_range(1..=bucket_count);
    u32::try_from(weight).unwrap_or(1)
}

fn generate_sparse(rng: &mut SmallRng) -> MsfFixture {
    let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
    let bucket_count = rng.gen_range(1..=MAX_BUCKETS);
    let mut edges = Vec::new();

    // A random tree keeps the graph connected before extra edges are added.
    for node in 2..=node_count {
        let parent = rng.gen_range(1..node);
        edges.push((parent, node, random_weight(rng, bucket_count)));
    }
    let extra = rng.gen_range(0..=node_count);
    for _ in 0..extra {
        let n1 = rng.gen_range(1..=node_count);
        let n2 = rng.gen_range(1..=node_count);
        edges.push((n1, n2, random_weight(rng, bucket_count)));
    }

    MsfFixture {
        node_count,
        bucket_count,
        edges,
        shape: GraphShape::Sparse,
    }
}

fn generate_dense(rng: &mut SmallRng) -> MsfFixture {
    let node_count = rng.gen_range(MIN_NODES..=DENSE_MAX_NODES);
    let bucket_count = rng.gen_range(1..=MAX_BUCKETS);
    let probability = rng.gen_range(0.6..=0.95);
    let mut edges = Vec::new();

    for n1 in 1..=node_count {
        for n2 in (n1 + 1)..=node_count {
            if rng.gen_bool(probability) {
                edges.push((n1, n2, random_weight(rng, bucket_count)));
            }
        }
    }

    MsfFixture {
        node_count,
        bucket_count,
        edges,
        shape: GraphShape::Dense,
    }
}

fn generate_single_bucket(rng: &mut SmallRng) -> MsfFixture {
    let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
    let bucket_count = rng.gen_range(1..=MAX_BUCKETS);
    let edge_count = rng.gen_range(node_count..=node_count * 3);
    let edges = (0..edge_count)
        .map(|_| {
            (
                rng.gen_range(1..=node_count),
                rng.gen_range(1..=node_count),
                1,
            )
        })
        .collect();

    MsfFixture {
        node_count,
        bucket_count,
        edges,
        shape: GraphShape::SingleBucket,
    }
}

fn generate_disconnected(rng: &mut SmallRng) -> MsfFixture {
    let component_count = rng.gen_range(2..=5_u64);
    let component_size = rng.gen_range(2..=MAX_NODES / component_count);
    let bucket_count = rng.gen_range(1..=MAX_BUCKETS);
    // Trailing ids beyond the last component stay isolated.
    let node_count = component_count * component_size + rng.gen_range(0..=3);
    let mut edges = Vec::new();

    for component in 0..component_count {
        let first = component * component_size + 1;
        let last = first + component_size - 1;
        for node in (first + 1)..=last {
            let parent = rng.gen_range(first..node);
            edges.push((parent, node, random_weight(rng, bucket_count)));
        }
        for _ in 0..component_size {
            let n1 = rng.gen_range(first..=last);
            let n2 = rng.gen_range(first..=last);
            edges.push((n1, n2, random_weight(rng, bucket_count)));
        }
    }

    MsfFixture {
        node_count,
        bucket_count,
        edges,
        shape: GraphShape::Disconnected,
    }
}

impl proptest::arbitrary::Arbitrary for GraphShape {
    type Parameters = ();
    type Strategy = proptest::strategy::TupleUnion<(
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
    )>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            3 => Just(Self::Sparse),
            2 => Just(Self::Dense),
            2 => Just(Self::SingleBucket),
            2 => Just(Self::Disconnected),
        ]
    }
}
