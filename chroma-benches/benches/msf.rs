//! Bucketed Kruskal benchmarks.
//!
//! Measures the time to compute a minimum spanning forest over random edge
//! lists of increasing size. Graph generation happens once per size, outside
//! the measured closure.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use chroma_benches::{
    error::BenchSetupError,
    params::MsfBenchParams,
    source::{SyntheticGraph, SyntheticGraphConfig},
};

/// Seed used for all synthetic graph generation in this benchmark.
const SEED: u64 = 42;

/// Weight range of the generated edges.
const BUCKET_COUNT: usize = 16;

/// Average number of edges incident to each node.
const EDGES_PER_NODE: usize = 4;

/// Graph sizes to benchmark.
const NODE_COUNTS: &[u64] = &[1_000, 10_000, 100_000];

fn msf_bucketed_kruskal_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("bucketed_kruskal");
    group.sample_size(20);

    for &node_count in NODE_COUNTS {
        let nodes = usize::try_from(node_count).unwrap_or(usize::MAX);
        let edge_count = nodes.saturating_mul(EDGES_PER_NODE);
        let graph = SyntheticGraph::generate(&SyntheticGraphConfig {
            node_count,
            edge_count,
            bucket_count: BUCKET_COUNT,
            seed: SEED,
        })?;

        let params = MsfBenchParams {
            node_count,
            edge_count,
        };
        group.throughput(Throughput::Elements(
            u64::try_from(edge_count).unwrap_or(u64::MAX),
        ));
        group.bench_with_input(BenchmarkId::from_parameter(&params), &graph, |b, graph| {
            b.iter(|| graph.kruskal_msf());
        });
    }

    group.finish();
    Ok(())
}

fn msf_bucketed_kruskal(c: &mut Criterion) {
    if let Err(err) = msf_bucketed_kruskal_impl(c) {
        panic!("msf_bucketed_kruskal benchmark setup failed: {err}");
    }
}

criterion_group!(benches, msf_bucketed_kruskal);
criterion_main!(benches);
