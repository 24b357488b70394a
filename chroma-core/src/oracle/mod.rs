//! Membership oracles answering point queries over canonical k-mers.
//!
//! The unitig engine only needs to know whether a k-mer exists, which color
//! class it carries, and which dense slot tracks its visitation. Any index
//! that can answer those questions and enumerate its stored keys can drive
//! compaction through [`MembershipOracle`].

mod kmer_list;
mod mphf;

use crate::kmer::CanonicalKmer;

pub use self::{
    kmer_list::read_kmer_list,
    mphf::{MphfOracle, MphfOracleBuilder},
};

/// Identifier of the color class attached to a stored k-mer.
pub type ColorId = u64;

/// Point-query capability over a static set of canonical k-mers.
///
/// Absence is an ordinary answer, never an error. Implementations must
/// assign every stored key a distinct dense index below
/// [`MembershipOracle::num_slots`].
pub trait MembershipOracle {
    /// Length of every stored k-mer.
    fn k(&self) -> usize;

    /// Returns the color of `kmer`, or `None` when it is not stored.
    fn query(&self, kmer: CanonicalKmer) -> Option<ColorId>;

    /// Returns the dense index of `kmer`, or `None` when it is not stored.
    fn unique_index(&self, kmer: CanonicalKmer) -> Option<usize>;

    /// Iterates over the raw stored keys in ascending order.
    fn iter(&self) -> impl Iterator<Item = u64> + '_;

    /// Size of the dense index space.
    fn num_slots(&self) -> usize;

    /// Number of distinct stored keys.
    fn distinct_keys(&self) -> usize;

    /// Returns `true` when `kmer` is stored.
    fn contains(&self, kmer: CanonicalKmer) -> bool {
        self.query(kmer).is_some()
    }
}
