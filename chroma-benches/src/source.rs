//! Seeded synthetic inputs for benchmarking.
//!
//! [`SyntheticGraph`] produces a [`BucketedGraph`] with uniformly random
//! endpoints and weights. [`SyntheticGenome`] produces a random DNA sequence
//! and loads every k-mer of it into an [`MphfOracle`]. Both are reproducible
//! for a given seed.

use chroma_core::{Base, BucketedGraph, Kmer, MphfOracle, MphfOracleBuilder};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Errors that may occur when a synthetic configuration is unusable.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested node count was zero.
    #[error("node count must be greater than zero")]
    ZeroNodes,
    /// The requested bucket count does not fit a `u32` edge weight.
    #[error("bucket count {bucket_count} must be between 1 and u32::MAX")]
    InvalidBucketCount {
        /// The rejected bucket count.
        bucket_count: usize,
    },
    /// The genome is shorter than a single k-mer.
    #[error("genome length {genome_len} is shorter than k = {k}")]
    GenomeTooShort {
        /// The requested genome length.
        genome_len: usize,
        /// The requested k-mer length.
        k: usize,
    },
}

/// Configuration for synthetic graph generation.
#[derive(Clone, Debug)]
pub struct SyntheticGraphConfig {
    /// Node ids are drawn from `1..=node_count`.
    pub node_count: u64,
    /// Number of edges to insert.
    pub edge_count: usize,
    /// Weights are drawn from `1..=bucket_count`.
    pub bucket_count: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Generator for random bucketed edge lists.
///
/// # Examples
///
/// ```
/// use chroma_benches::source::{SyntheticGraph, SyntheticGraphConfig};
///
/// let config = SyntheticGraphConfig { node_count: 10, edge_count: 25, bucket_count: 4, seed: 7 };
/// let graph = SyntheticGraph::generate(&config).expect("valid config");
/// assert_eq!(graph.edge_count(), 25);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct SyntheticGraph;

impl SyntheticGraph {
    /// Generates a graph from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::ZeroNodes`] when `node_count` is zero and
    /// [`SyntheticError::InvalidBucketCount`] when `bucket_count` is zero or
    /// exceeds `u32::MAX`.
    pub fn generate(config: &SyntheticGraphConfig) -> Result<BucketedGraph, BenchSetupError> {
        if config.node_count == 0 {
            return Err(SyntheticError::ZeroNodes.into());
        }
        let max_weight = u32::try_from(config.bucket_count)
            .ok()
            .filter(|&weight| weight > 0)
            .ok_or(SyntheticError::InvalidBucketCount {
                bucket_count: config.bucket_count,
            })?;

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut graph = BucketedGraph::new(config.node_count, config.bucket_count)?;
        for _ in 0..config.edge_count {
            let n1 = rng.gen_range(1..=config.node_count);
            let n2 = rng.gen_range(1..=config.node_count);
            let weight = rng.gen_range(1..=max_weight);
            graph.add_edge(n1, n2, weight)?;
        }
        Ok(graph)
    }
}

/// Configuration for synthetic genome generation.
#[derive(Clone, Debug)]
pub struct SyntheticGenomeConfig {
    /// Number of bases in the genome.
    pub genome_len: usize,
    /// K-mer length stored in the oracle.
    pub k: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A random genome and the oracle holding its k-mers.
#[derive(Debug)]
pub struct SyntheticGenome {
    bases: Vec<Base>,
    oracle: MphfOracle,
}

impl SyntheticGenome {
    /// Generates a genome and indexes every k-mer it contains.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::GenomeTooShort`] when `genome_len < k` and
    /// [`BenchSetupError::Oracle`] when `k` is not a supported length.
    ///
    /// # Examples
    ///
    /// ```
    /// use chroma_benches::source::{SyntheticGenome, SyntheticGenomeConfig};
    /// use chroma_core::MembershipOracle;
    ///
    /// let config = SyntheticGenomeConfig { genome_len: 200, k: 15, seed: 3 };
    /// let genome = SyntheticGenome::generate(&config).expect("valid config");
    /// assert!(genome.oracle().distinct_keys() <= 186);
    /// ```
    pub fn generate(config: &SyntheticGenomeConfig) -> Result<Self, BenchSetupError> {
        let mut builder = MphfOracleBuilder::new(config.k)?;
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let bases: Vec<Base> = (0..config.genome_len)
            .map(|_| Base::from_code(rng.gen_range(0..4)))
            .collect();

        let (head, tail) =
            bases
                .split_at_checked(config.k)
                .ok_or(SyntheticError::GenomeTooShort {
                    genome_len: config.genome_len,
                    k: config.k,
                })?;
        let mut kmer = head
            .iter()
            .fold(Kmer::from_bits(0, config.k)?, |kmer, &base| {
                kmer.extend_right(base)
            });
        builder.insert(kmer, 0)?;
        for &base in tail {
            kmer = kmer.extend_right(base);
            builder.insert(kmer, 0)?;
        }

        Ok(Self {
            bases,
            oracle: builder.build(),
        })
    }

    /// Returns the generated bases.
    #[must_use]
    pub fn bases(&self) -> &[Base] {
        &self.bases
    }

    /// Returns the oracle over the genome's k-mers.
    #[must_use]
    pub const fn oracle(&self) -> &MphfOracle {
        &self.oracle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_core::{MembershipOracle, OracleError, Unitig, UnitigBuilder};
    use rstest::rstest;

    fn graph_config(node_count: u64, bucket_count: usize) -> SyntheticGraphConfig {
        SyntheticGraphConfig {
            node_count,
            edge_count: 64,
            bucket_count,
            seed: 42,
        }
    }

    fn genome_config(genome_len: usize, k: usize) -> SyntheticGenomeConfig {
        SyntheticGenomeConfig {
            genome_len,
            k,
            seed: 42,
        }
    }

    // -- graphs -----------------------------------------------------------

    #[rstest]
    #[case::single_bucket(16, 1)]
    #[case::many_buckets(32, 8)]
    fn graphs_respect_configuration(#[case] node_count: u64, #[case] bucket_count: usize) {
        let graph =
            SyntheticGraph::generate(&graph_config(node_count, bucket_count)).expect("must build");
        assert_eq!(graph.node_count(), node_count);
        assert_eq!(graph.bucket_count(), bucket_count);
        assert_eq!(graph.edge_count(), 64);
    }

    #[rstest]
    fn graphs_are_deterministic_per_seed() {
        let config = graph_config(20, 4);
        let a = SyntheticGraph::generate(&config).expect("must build");
        let b = SyntheticGraph::generate(&config).expect("must build");
        let weight = |graph: &BucketedGraph| {
            graph
                .kruskal_msf()
                .expect("forest must build")
                .forest()
                .total_weight()
        };
        assert_eq!(weight(&a), weight(&b));
        for bucket in 1..=4 {
            assert_eq!(a.bucket(bucket), b.bucket(bucket));
        }
    }

    #[rstest]
    fn rejects_zero_nodes() {
        let err = SyntheticGraph::generate(&graph_config(0, 2)).expect_err("must be rejected");
        assert!(matches!(
            err,
            BenchSetupError::Synthetic(SyntheticError::ZeroNodes)
        ));
    }

    #[rstest]
    fn rejects_zero_buckets() {
        let err = SyntheticGraph::generate(&graph_config(8, 0)).expect_err("must be rejected");
        assert!(matches!(
            err,
            BenchSetupError::Synthetic(SyntheticError::InvalidBucketCount { bucket_count: 0 })
        ));
    }

    // -- genomes ----------------------------------------------------------

    #[rstest]
    fn every_genome_kmer_is_a_member() {
        let genome = SyntheticGenome::generate(&genome_config(120, 9)).expect("must build");
        assert_eq!(genome.bases().len(), 120);
        let oracle = genome.oracle();
        for window in genome.bases().windows(9) {
            let kmer = window
                .iter()
                .fold(Kmer::from_bits(0, 9).expect("k is valid"), |kmer, &base| {
                    kmer.extend_right(base)
                });
            assert!(oracle.contains(kmer.canonical()));
        }
    }

    #[rstest]
    fn genome_oracle_compacts_without_losing_kmers() {
        let genome = SyntheticGenome::generate(&genome_config(300, 11)).expect("must build");
        let mut unitigs: Vec<Unitig> = Vec::new();
        let stats = UnitigBuilder::new(genome.oracle())
            .build(&mut unitigs)
            .expect("compaction must succeed");
        let distinct = genome.oracle().distinct_keys();
        assert_eq!(
            stats.kmers_visited,
            u64::try_from(distinct).expect("count fits in u64")
        );
        let covered: usize = unitigs.iter().map(Unitig::kmers).sum();
        assert_eq!(covered, distinct);
    }

    #[rstest]
    fn genome_length_equal_to_k_yields_one_kmer() {
        let genome = SyntheticGenome::generate(&genome_config(5, 5)).expect("must build");
        assert_eq!(genome.oracle().distinct_keys(), 1);
        let stored: Vec<u64> = genome.oracle().iter().collect();
        let first = genome
            .bases()
            .iter()
            .fold(Kmer::from_bits(0, 5).expect("k is valid"), |kmer, &base| {
                kmer.extend_right(base)
            });
        assert_eq!(stored, vec![first.canonical().bits()]);
    }

    #[rstest]
    fn rejects_genomes_shorter_than_k() {
        let err = SyntheticGenome::generate(&genome_config(4, 5)).expect_err("must be rejected");
        assert!(matches!(
            err,
            BenchSetupError::Synthetic(SyntheticError::GenomeTooShort { genome_len: 4, k: 5 })
        ));
    }

    #[rstest]
    fn rejects_unsupported_k() {
        let err = SyntheticGenome::generate(&genome_config(100, 33)).expect_err("must be rejected");
        assert!(matches!(
            err,
            BenchSetupError::Oracle(OracleError::InvalidK { k: 33 })
        ));
    }
}
