//! In-memory oracle backed by a minimal perfect hash.

use std::collections::BTreeMap;

use boomphf::Mphf;
use tracing::{debug, instrument};

use crate::{
    error::OracleError,
    kmer::{CanonicalKmer, Kmer, MAX_K, mask},
};

use super::{ColorId, MembershipOracle};

/// Load factor handed to the perfect-hash construction.
const MPHF_GAMMA: f64 = 1.7;

/// Collects canonical k-mers and their colors before hashing.
///
/// # Examples
/// ```
/// use chroma_core::{Kmer, MembershipOracle, MphfOracleBuilder};
///
/// let mut builder = MphfOracleBuilder::new(4)?;
/// builder.insert("AAAA".parse()?, 7)?;
/// let oracle = builder.build();
///
/// let query: Kmer = "TTTT".parse()?;
/// assert_eq!(oracle.query(query.canonical()), Some(7));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct MphfOracleBuilder {
    k: usize,
    entries: BTreeMap<u64, ColorId>,
}

impl MphfOracleBuilder {
    /// Starts an empty builder for `k`-mers.
    ///
    /// # Errors
    /// Returns [`OracleError::InvalidK`] when `k` is zero or exceeds
    /// [`MAX_K`].
    pub fn new(k: usize) -> Result<Self, OracleError> {
        if k == 0 || k > MAX_K {
            return Err(OracleError::InvalidK { k });
        }
        Ok(Self {
            k,
            entries: BTreeMap::new(),
        })
    }

    /// Length of the k-mers this builder accepts.
    #[must_use]
    #[rustfmt::skip]
    pub const fn k(&self) -> usize { self.k }

    /// Number of distinct keys inserted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stores the canonical form of `kmer` with `color`.
    ///
    /// Inserting a k-mer or its reverse complement again replaces the color.
    ///
    /// # Errors
    /// Returns [`OracleError::MismatchedK`] when `kmer` has the wrong length.
    pub fn insert(&mut self, kmer: Kmer, color: ColorId) -> Result<(), OracleError> {
        if kmer.k() != self.k {
            return Err(OracleError::MismatchedK {
                kmer: kmer.to_string().into(),
                expected: self.k,
                actual: kmer.k(),
            });
        }
        self.entries.insert(kmer.canonical().bits(), color);
        Ok(())
    }

    /// Stores a raw packed key, canonicalising it first.
    ///
    /// # Errors
    /// Returns [`OracleError::KeyTooWide`] when `key` has bits above `2k`.
    pub fn insert_key(&mut self, key: u64, color: ColorId) -> Result<(), OracleError> {
        if key & !mask(self.k) != 0 {
            return Err(OracleError::KeyTooWide { key, k: self.k });
        }
        let kmer = Kmer::from_bits(key, self.k).map_err(|_| OracleError::InvalidK { k: self.k })?;
        self.insert(kmer, color)
    }

    /// Hashes the collected keys into an immutable oracle.
    #[must_use]
    #[instrument(name = "oracle.build", skip(self), fields(k = self.k, keys = self.entries.len()))]
    pub fn build(self) -> MphfOracle {
        let keys: Vec<u64> = self.entries.keys().copied().collect();
        let mphf = (!keys.is_empty()).then(|| Mphf::new(MPHF_GAMMA, &keys));

        let mut slots = vec![0_u64; keys.len()];
        let mut colors = vec![0; keys.len()];
        if let Some(hash) = &mphf {
            for (&key, &color) in &self.entries {
                let index = slot_of(hash.hash(&key));
                slots[index] = key;
                colors[index] = color;
            }
        }
        debug!(keys = keys.len(), "perfect hash built");

        MphfOracle {
            k: self.k,
            mphf,
            keys,
            slots,
            colors,
        }
    }
}

/// A static oracle whose dense ids come from a minimal perfect hash.
///
/// The hash maps keys outside the stored set to arbitrary slots, so every
/// lookup confirms the hit against the key recorded in that slot.
pub struct MphfOracle {
    k: usize,
    mphf: Option<Mphf<u64>>,
    keys: Vec<u64>,
    slots: Vec<u64>,
    colors: Vec<ColorId>,
}

impl MphfOracle {
    fn slot(&self, kmer: CanonicalKmer) -> Option<usize> {
        if kmer.kmer().k() != self.k {
            return None;
        }
        let key = kmer.bits();
        let index = slot_of(self.mphf.as_ref()?.try_hash(&key)?);
        (self.slots.get(index) == Some(&key)).then_some(index)
    }
}

impl MembershipOracle for MphfOracle {
    fn k(&self) -> usize {
        self.k
    }

    fn query(&self, kmer: CanonicalKmer) -> Option<ColorId> {
        self.slot(kmer).map(|index| self.colors[index])
    }

    fn unique_index(&self, kmer: CanonicalKmer) -> Option<usize> {
        self.slot(kmer)
    }

    fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.keys.iter().copied()
    }

    fn num_slots(&self) -> usize {
        self.slots.len()
    }

    fn distinct_keys(&self) -> usize {
        self.keys.len()
    }
}

impl std::fmt::Debug for MphfOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MphfOracle")
            .field("k", &self.k)
            .field("keys", &self.keys.len())
            .finish_non_exhaustive()
    }
}

// Perfect-hash outputs are below the key count, which is an in-memory length.
const fn slot_of(hash: u64) -> usize {
    hash as usize
}
