//! Two-bit packed DNA k-mers and their canonical form.
//!
//! Bases are encoded `A=0, C=1, G=2, T=3` with the first base in the most
//! significant position, so integer order matches lexicographic order of the
//! decoded sequence. The complement of a base code `b` is `3 - b`.

use std::{fmt, str::FromStr};

use crate::error::KmerError;

/// Largest k that fits in the 64-bit packed representation.
pub const MAX_K: usize = 32;

/// A single nucleotide.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum Base {
    /// Adenine.
    A = 0,
    /// Cytosine.
    C = 1,
    /// Guanine.
    G = 2,
    /// Thymine.
    T = 3,
}

impl Base {
    /// All bases in code order.
    pub const ALL: [Self; 4] = [Self::A, Self::C, Self::G, Self::T];

    /// Returns the two-bit code for this base.
    #[must_use]
    pub const fn code(self) -> u64 {
        self as u64
    }

    /// Decodes the low two bits of `code`.
    #[must_use]
    pub const fn from_code(code: u64) -> Self {
        match code & 0b11 {
            0 => Self::A,
            1 => Self::C,
            2 => Self::G,
            _ => Self::T,
        }
    }

    /// Returns the Watson-Crick complement.
    #[must_use]
    pub const fn complement(self) -> Self {
        Self::from_code(3 - self.code())
    }

    /// Parses an upper- or lower-case `ACGT` character.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            'A' | 'a' => Some(Self::A),
            'C' | 'c' => Some(Self::C),
            'G' | 'g' => Some(Self::G),
            'T' | 't' => Some(Self::T),
            _ => None,
        }
    }

    /// Returns the upper-case character for this base.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::C => 'C',
            Self::G => 'G',
            Self::T => 'T',
        }
    }
}

/// A k-mer of length `1..=MAX_K` packed into a `u64`.
///
/// # Examples
/// ```
/// use chroma_core::{Base, Kmer};
///
/// let kmer: Kmer = "AACG".parse()?;
/// assert_eq!(kmer.extend_right(Base::T).to_string(), "ACGT");
/// assert_eq!(kmer.extend_left(Base::T).to_string(), "TAAC");
/// assert_eq!(kmer.reverse_complement().to_string(), "CGTT");
/// # Ok::<(), chroma_core::KmerError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Kmer {
    bits: u64,
    k: usize,
}

impl Kmer {
    /// Builds a k-mer from packed bits, discarding anything above `2k` bits.
    ///
    /// # Errors
    /// Returns [`KmerError::InvalidLength`] when `k` is zero or exceeds
    /// [`MAX_K`].
    pub const fn from_bits(bits: u64, k: usize) -> Result<Self, KmerError> {
        if k == 0 || k > MAX_K {
            return Err(KmerError::InvalidLength { k });
        }
        Ok(Self {
            bits: bits & mask(k),
            k,
        })
    }

    /// Returns the packed representation.
    #[must_use]
    #[rustfmt::skip]
    pub const fn bits(&self) -> u64 { self.bits }

    /// Returns the number of bases.
    #[must_use]
    #[rustfmt::skip]
    pub const fn k(&self) -> usize { self.k }

    /// Returns the base at `position` (zero is the 5' end).
    ///
    /// # Panics
    /// Panics when `position >= k`.
    #[must_use]
    pub const fn base(&self, position: usize) -> Base {
        let shift = 2 * (self.k - 1 - position);
        Base::from_code(self.bits >> shift)
    }

    /// Returns the 5'-most base.
    #[must_use]
    pub const fn first_base(&self) -> Base {
        self.base(0)
    }

    /// Returns the 3'-most base.
    #[must_use]
    pub const fn last_base(&self) -> Base {
        Base::from_code(self.bits)
    }

    /// Drops the first base and appends `base` at the 3' end.
    #[must_use]
    pub const fn extend_right(&self, base: Base) -> Self {
        Self {
            bits: ((self.bits << 2) | base.code()) & mask(self.k),
            k: self.k,
        }
    }

    /// Drops the last base and prepends `base` at the 5' end.
    #[must_use]
    pub const fn extend_left(&self, base: Base) -> Self {
        Self {
            bits: (self.bits >> 2) | (base.code() << (2 * (self.k - 1))),
            k: self.k,
        }
    }

    /// Returns the reverse complement.
    #[must_use]
    pub const fn reverse_complement(&self) -> Self {
        let mut forward = self.bits;
        let mut reverse = 0_u64;
        let mut remaining = self.k;
        while remaining > 0 {
            reverse = (reverse << 2) | (3 - (forward & 0b11));
            forward >>= 2;
            remaining -= 1;
        }
        Self {
            bits: reverse,
            k: self.k,
        }
    }

    /// Returns the strand-independent representative of this k-mer.
    #[must_use]
    pub const fn canonical(&self) -> CanonicalKmer {
        let reverse = self.reverse_complement();
        let bits = if reverse.bits < self.bits {
            reverse.bits
        } else {
            self.bits
        };
        CanonicalKmer(Self { bits, k: self.k })
    }

    /// Returns `true` when the k-mer equals its own reverse complement.
    #[must_use]
    pub const fn is_palindrome(&self) -> bool {
        self.reverse_complement().bits == self.bits
    }

    /// Iterates over the bases from 5' to 3'.
    pub fn bases(&self) -> impl Iterator<Item = Base> + '_ {
        (0..self.k).map(|position| self.base(position))
    }
}

impl FromStr for Kmer {
    type Err = KmerError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let k = text.chars().count();
        if k == 0 || k > MAX_K {
            return Err(KmerError::InvalidLength { k });
        }
        let mut bits = 0_u64;
        for (position, ch) in text.chars().enumerate() {
            let base = Base::from_char(ch).ok_or(KmerError::InvalidBase { base: ch, position })?;
            bits = (bits << 2) | base.code();
        }
        Ok(Self { bits, k })
    }
}

impl fmt::Display for Kmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in self.bases() {
            fmt::Write::write_char(f, base.as_char())?;
        }
        Ok(())
    }
}

/// A k-mer known to be the smaller of itself and its reverse complement.
///
/// Only [`Kmer::canonical`] produces values of this type, so membership
/// lookups cannot accidentally be keyed by a strand-specific k-mer.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CanonicalKmer(Kmer);

impl CanonicalKmer {
    /// Returns the packed representation used as the oracle key.
    #[must_use]
    pub const fn bits(&self) -> u64 {
        self.0.bits
    }

    /// Returns the underlying k-mer.
    #[must_use]
    pub const fn kmer(&self) -> Kmer {
        self.0
    }
}

impl fmt::Display for CanonicalKmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl PartialOrd for Kmer {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Kmer {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.k.cmp(&other.k).then_with(|| self.bits.cmp(&other.bits))
    }
}

/// Bit mask covering the low `2k` bits.
#[must_use]
pub const fn mask(k: usize) -> u64 {
    if k >= MAX_K {
        u64::MAX
    } else {
        (1_u64 << (2 * k)) - 1
    }
}
