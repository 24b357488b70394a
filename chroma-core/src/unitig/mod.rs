//! Compaction of the implicit de Bruijn graph into unitigs.
//!
//! The graph is never materialised. Neighbours of a k-mer are discovered by
//! asking the oracle about each of the four one-base extensions, and a bit
//! per dense oracle slot records which k-mers already belong to an emitted
//! unitig. Every stored key is claimed by exactly one unitig.

mod fasta;

use bitvec::vec::BitVec;
use tracing::{debug, info, instrument};

use crate::{
    error::UnitigError,
    kmer::{Base, Kmer, mask},
    oracle::MembershipOracle,
};

pub use self::fasta::FastaUnitigWriter;

/// A maximal non-branching path of k-mers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Unitig {
    sequence: String,
    kmers: usize,
}

impl Unitig {
    /// Returns the spelled sequence.
    #[must_use]
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Number of k-mers the unitig covers.
    #[must_use]
    #[rustfmt::skip]
    pub const fn kmers(&self) -> usize { self.kmers }

    /// Consumes the unitig, returning its sequence.
    #[must_use]
    pub fn into_sequence(self) -> String {
        self.sequence
    }
}

/// Destination for emitted unitigs.
pub trait UnitigSink {
    /// Receives one unitig.
    ///
    /// # Errors
    /// Returns [`UnitigError`] when the unitig cannot be recorded.
    fn emit(&mut self, unitig: &Unitig) -> Result<(), UnitigError>;
}

impl UnitigSink for Vec<Unitig> {
    fn emit(&mut self, unitig: &Unitig) -> Result<(), UnitigError> {
        self.push(unitig.clone());
        Ok(())
    }
}

/// Counters reported after a compaction run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct UnitigStats {
    /// Number of unitigs emitted.
    pub unitigs: u64,
    /// Number of k-mers claimed by those unitigs.
    pub kmers_visited: u64,
}

#[derive(Clone, Copy, Debug)]
enum Direction {
    Forward,
    Backward,
}

/// Walks an oracle's stored keys and emits one unitig per unvisited seed.
///
/// # Examples
/// ```
/// use chroma_core::{MphfOracleBuilder, Unitig, UnitigBuilder};
///
/// let mut builder = MphfOracleBuilder::new(4)?;
/// for text in ["AAAA", "AAAT", "AATG"] {
///     builder.insert(text.parse()?, 0)?;
/// }
/// let oracle = builder.build();
///
/// let mut unitigs: Vec<Unitig> = Vec::new();
/// let stats = UnitigBuilder::new(&oracle).build(&mut unitigs)?;
/// assert_eq!(stats.unitigs, 1);
/// assert_eq!(unitigs[0].sequence(), "AAAATG");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct UnitigBuilder<'a, O> {
    oracle: &'a O,
    visited: BitVec,
}

impl<'a, O: MembershipOracle> UnitigBuilder<'a, O> {
    /// Prepares a run with every dense slot unvisited.
    #[must_use]
    pub fn new(oracle: &'a O) -> Self {
        Self {
            oracle,
            visited: BitVec::repeat(false, oracle.num_slots()),
        }
    }

    /// Emits every unitig of the oracle's k-mer set into `sink`.
    ///
    /// # Errors
    /// Returns [`UnitigError::MalformedKey`] when a stored key does not
    /// decode to a k-mer, [`UnitigError::MissingIndex`] or
    /// [`UnitigError::SlotOutOfRange`] when the oracle breaks its dense-id
    /// contract, and any error raised by the sink.
    #[instrument(
        name = "unitig.build",
        err,
        skip(self, sink),
        fields(k = self.oracle.k(), slots = self.oracle.num_slots()),
    )]
    pub fn build<S: UnitigSink>(mut self, sink: &mut S) -> Result<UnitigStats, UnitigError> {
        info!(
            num_slots = self.oracle.num_slots(),
            distinct_keys = self.oracle.distinct_keys(),
            "building unitigs"
        );
        let oracle = self.oracle;
        let mut stats = UnitigStats::default();

        for key in oracle.iter() {
            let seed = self.decode(key)?;
            let index = self.index_of(seed)?.ok_or(UnitigError::MissingIndex { key })?;
            if self.visited[index] {
                continue;
            }
            let unitig = self.walk(seed, index)?;
            stats.unitigs += 1;
            stats.kmers_visited += unitig.kmers as u64;
            debug!(length = unitig.sequence.len(), kmers = unitig.kmers, "unitig emitted");
            sink.emit(&unitig)?;
        }

        record_metrics(&stats);
        info!(
            unitigs = stats.unitigs,
            kmers_visited = stats.kmers_visited,
            "unitig build complete"
        );
        Ok(stats)
    }

    fn decode(&self, key: u64) -> Result<Kmer, UnitigError> {
        let k = self.oracle.k();
        if key & !mask(k) != 0 {
            return Err(UnitigError::MalformedKey { key, k });
        }
        Kmer::from_bits(key, k).map_err(|_| UnitigError::MalformedKey { key, k })
    }

    /// Looks `kmer` up by its canonical form, validating the dense index.
    fn index_of(&self, kmer: Kmer) -> Result<Option<usize>, UnitigError> {
        let canonical = kmer.canonical();
        if !self.oracle.contains(canonical) {
            return Ok(None);
        }
        let index = self
            .oracle
            .unique_index(canonical)
            .ok_or(UnitigError::MissingIndex {
                key: canonical.bits(),
            })?;
        if index >= self.visited.len() {
            return Err(UnitigError::SlotOutOfRange {
                index,
                num_slots: self.visited.len(),
            });
        }
        Ok(Some(index))
    }

    fn walk(&mut self, seed: Kmer, seed_index: usize) -> Result<Unitig, UnitigError> {
        self.visited.set(seed_index, true);
        let mut kmers = 1;

        let mut appended = Vec::new();
        let mut current = seed;
        while let Some((next, index)) = self.sole_extension(current, Direction::Forward)? {
            self.visited.set(index, true);
            appended.push(next.last_base());
            kmers += 1;
            current = next;
        }

        let mut prepended = Vec::new();
        current = seed;
        while let Some((previous, index)) = self.sole_extension(current, Direction::Backward)? {
            self.visited.set(index, true);
            prepended.push(previous.first_base());
            kmers += 1;
            current = previous;
        }

        let sequence = prepended
            .iter()
            .rev()
            .copied()
            .chain(seed.bases())
            .chain(appended)
            .map(Base::as_char)
            .collect();
        Ok(Unitig { sequence, kmers })
    }

    /// Returns the neighbour in `direction` when it is the only stored one
    /// and is still unvisited.
    ///
    /// Visited neighbours count towards the branching degree, so a walk never
    /// crosses a k-mer with two stored successors. A neighbour with the same
    /// canonical form as `current` is a self-loop and is not counted.
    fn sole_extension(
        &self,
        current: Kmer,
        direction: Direction,
    ) -> Result<Option<(Kmer, usize)>, UnitigError> {
        let own = current.canonical();
        let mut sole = None;
        for base in Base::ALL {
            let neighbour = match direction {
                Direction::Forward => current.extend_right(base),
                Direction::Backward => current.extend_left(base),
            };
            if neighbour.canonical() == own {
                continue;
            }
            let Some(index) = self.index_of(neighbour)? else {
                continue;
            };
            if sole.replace((neighbour, index)).is_some() {
                return Ok(None);
            }
        }
        Ok(sole.filter(|&(_, index)| !self.visited[index]))
    }
}

#[cfg(feature = "metrics")]
fn record_metrics(stats: &UnitigStats) {
    metrics::counter!("unitigs_emitted").increment(stats.unitigs);
    metrics::counter!("unitig_kmers_visited").increment(stats.kmers_visited);
}

#[cfg(not(feature = "metrics"))]
const fn record_metrics(_stats: &UnitigStats) {}
