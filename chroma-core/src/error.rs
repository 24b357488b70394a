//! Error types for the chroma core library.
//!
//! Every error enum carries a stable machine-readable code so the CLI can log
//! failures without depending on display strings.

use std::{fmt, io, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Invariant violations raised by [`crate::DisjointSets`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ForestError {
    /// A node id fell outside `0..=node_count`.
    #[error("node {node} is outside the forest (node_count {node_count})")]
    NodeOutOfRange {
        /// The offending node id.
        node: u64,
        /// Highest valid node id.
        node_count: u64,
    },
    /// Both merge arguments resolve to the same root.
    #[error("cannot merge root {root} with itself")]
    SelfMerge {
        /// The shared root.
        root: u64,
    },
    /// A merge argument was not the current root of its tree.
    #[error("node {node} is not a root (its root is {root})")]
    NotARoot {
        /// The node passed to `merge`.
        node: u64,
        /// The root `node` currently resolves to.
        root: u64,
    },
}

define_error_codes! {
    /// Stable codes describing [`ForestError`] variants.
    enum ForestErrorCode for ForestError {
        /// A node id fell outside the forest.
        NodeOutOfRange => NodeOutOfRange { .. } => "FOREST_NODE_OUT_OF_RANGE",
        /// Both merge arguments resolve to the same root.
        SelfMerge => SelfMerge { .. } => "FOREST_SELF_MERGE",
        /// A merge argument was not a root.
        NotARoot => NotARoot { .. } => "FOREST_NOT_A_ROOT",
    }
}

/// Errors raised while assembling a bucketed graph or building its forest.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The graph was configured without any weight buckets.
    #[error("bucket count must be at least 1")]
    ZeroBuckets,
    /// An edge weight fell outside `1..=bucket_count`.
    #[error("edge ({n1}, {n2}) has weight {weight}, expected 1..={bucket_count}")]
    WeightOutOfRange {
        /// First endpoint.
        n1: u64,
        /// Second endpoint.
        n2: u64,
        /// The rejected weight.
        weight: u32,
        /// Number of buckets configured for the graph.
        bucket_count: usize,
    },
    /// An edge endpoint fell outside `0..=node_count`.
    #[error("edge references node {node}, but node_count is {node_count}")]
    NodeOutOfRange {
        /// The invalid endpoint.
        node: u64,
        /// Highest valid node id.
        node_count: u64,
    },
    /// The forest rejected a merge while building.
    #[error(transparent)]
    Forest(#[from] ForestError),
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The graph was configured without any weight buckets.
        ZeroBuckets => ZeroBuckets => "GRAPH_ZERO_BUCKETS",
        /// An edge weight fell outside the bucket range.
        WeightOutOfRange => WeightOutOfRange { .. } => "GRAPH_WEIGHT_OUT_OF_RANGE",
        /// An edge endpoint fell outside the node range.
        NodeOutOfRange => NodeOutOfRange { .. } => "GRAPH_NODE_OUT_OF_RANGE",
        /// The forest rejected a merge while building.
        Forest => Forest(..) => "GRAPH_FOREST_INVARIANT",
    }
}

/// Errors raised while reading an edge list.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EdgeListError {
    /// Reading the underlying stream failed.
    #[error("failed to read edge list: {source}")]
    Io {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The input ended before the header line.
    #[error("edge list is empty; expected a header line")]
    MissingHeader,
    /// A line did not contain exactly three fields.
    #[error("line {line}: expected `node1 node2 weight`, found `{content}`")]
    MalformedLine {
        /// One-based line number.
        line: usize,
        /// The offending line.
        content: Arc<str>,
    },
    /// A field could not be parsed as an unsigned integer.
    #[error("line {line}: invalid {field} `{value}`")]
    InvalidField {
        /// One-based line number.
        line: usize,
        /// Name of the field that failed to parse.
        field: &'static str,
        /// Raw field text.
        value: Arc<str>,
    },
    /// The parsed edge was rejected by the graph.
    #[error("line {line}: {source}")]
    Graph {
        /// One-based line number.
        line: usize,
        /// Graph validation failure.
        #[source]
        source: GraphError,
    },
}

define_error_codes! {
    /// Stable codes describing [`EdgeListError`] variants.
    enum EdgeListErrorCode for EdgeListError {
        /// Reading the underlying stream failed.
        Io => Io { .. } => "EDGE_LIST_IO",
        /// The input ended before the header line.
        MissingHeader => MissingHeader => "EDGE_LIST_MISSING_HEADER",
        /// A line did not contain exactly three fields.
        MalformedLine => MalformedLine { .. } => "EDGE_LIST_MALFORMED_LINE",
        /// A field could not be parsed.
        InvalidField => InvalidField { .. } => "EDGE_LIST_INVALID_FIELD",
        /// The parsed edge was rejected by the graph.
        Graph => Graph { .. } => "EDGE_LIST_GRAPH",
    }
}

/// Errors raised while encoding k-mers.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum KmerError {
    /// The k-mer length is zero or exceeds [`crate::MAX_K`].
    #[error("k-mer length {k} is outside 1..={max}", max = crate::MAX_K)]
    InvalidLength {
        /// The rejected length.
        k: usize,
    },
    /// The sequence contained a character outside `ACGT`.
    #[error("invalid base `{base}` at position {position}")]
    InvalidBase {
        /// The offending character.
        base: char,
        /// Zero-based position of the character.
        position: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`KmerError`] variants.
    enum KmerErrorCode for KmerError {
        /// The k-mer length is out of range.
        InvalidLength => InvalidLength { .. } => "KMER_INVALID_LENGTH",
        /// The sequence contained a non-ACGT character.
        InvalidBase => InvalidBase { .. } => "KMER_INVALID_BASE",
    }
}

/// Errors raised while building or loading a membership oracle.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum OracleError {
    /// The oracle was configured with an unusable k.
    #[error("oracle k {k} is outside 1..={max}", max = crate::MAX_K)]
    InvalidK {
        /// The rejected k.
        k: usize,
    },
    /// A raw key has bits set above the low `2k` bits.
    #[error("key {key:#x} is wider than {k} bases")]
    KeyTooWide {
        /// The rejected key.
        key: u64,
        /// The oracle's k.
        k: usize,
    },
    /// A k-mer of the wrong length was inserted.
    #[error("k-mer `{kmer}` has length {actual}, but the oracle stores {expected}-mers")]
    MismatchedK {
        /// Text of the rejected k-mer.
        kmer: Arc<str>,
        /// The oracle's k.
        expected: usize,
        /// Length of the rejected k-mer.
        actual: usize,
    },
    /// A k-mer failed to encode.
    #[error("line {line}: {source}")]
    Kmer {
        /// One-based line number in the k-mer list.
        line: usize,
        /// Encoding failure.
        #[source]
        source: KmerError,
    },
    /// A color id failed to parse.
    #[error("line {line}: invalid color id `{value}`")]
    InvalidColor {
        /// One-based line number in the k-mer list.
        line: usize,
        /// Raw field text.
        value: Arc<str>,
    },
    /// The k-mer list contained no k-mers.
    #[error("k-mer list contains no k-mers")]
    Empty,
    /// Reading the k-mer list failed.
    #[error("failed to read k-mer list: {source}")]
    Io {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

define_error_codes! {
    /// Stable codes describing [`OracleError`] variants.
    enum OracleErrorCode for OracleError {
        /// The oracle was configured with an unusable k.
        InvalidK => InvalidK { .. } => "ORACLE_INVALID_K",
        /// A raw key is wider than `2k` bits.
        KeyTooWide => KeyTooWide { .. } => "ORACLE_KEY_TOO_WIDE",
        /// A k-mer of the wrong length was inserted.
        MismatchedK => MismatchedK { .. } => "ORACLE_MISMATCHED_K",
        /// A k-mer failed to encode.
        Kmer => Kmer { .. } => "ORACLE_KMER",
        /// A color id failed to parse.
        InvalidColor => InvalidColor { .. } => "ORACLE_INVALID_COLOR",
        /// The k-mer list contained no k-mers.
        Empty => Empty => "ORACLE_EMPTY",
        /// Reading the k-mer list failed.
        Io => Io { .. } => "ORACLE_IO",
    }
}

/// Fatal conditions raised by the unitig compaction engine.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum UnitigError {
    /// A stored key is wider than `2k` bits and cannot be decoded.
    #[error("stored key {key:#x} does not decode to a {k}-mer")]
    MalformedKey {
        /// The raw stored key.
        key: u64,
        /// The oracle's k.
        k: usize,
    },
    /// The oracle reported a key as present but could not index it.
    #[error("oracle has no dense index for present key {key:#x}")]
    MissingIndex {
        /// The canonical key that failed to index.
        key: u64,
    },
    /// The oracle returned a dense index outside its slot range.
    #[error("dense index {index} exceeds oracle slot count {num_slots}")]
    SlotOutOfRange {
        /// The reported dense index.
        index: usize,
        /// The oracle's slot count.
        num_slots: usize,
    },
    /// Writing a unitig record failed.
    #[error("failed to write unitig: {source}")]
    Io {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

define_error_codes! {
    /// Stable codes describing [`UnitigError`] variants.
    enum UnitigErrorCode for UnitigError {
        /// A stored key cannot be decoded.
        MalformedKey => MalformedKey { .. } => "UNITIG_MALFORMED_KEY",
        /// A present key had no dense index.
        MissingIndex => MissingIndex { .. } => "UNITIG_MISSING_INDEX",
        /// A dense index exceeded the slot count.
        SlotOutOfRange => SlotOutOfRange { .. } => "UNITIG_SLOT_OUT_OF_RANGE",
        /// Writing a unitig record failed.
        Io => Io { .. } => "UNITIG_IO",
    }
}

impl From<io::Error> for UnitigError {
    fn from(source: io::Error) -> Self {
        Self::Io { source }
    }
}
