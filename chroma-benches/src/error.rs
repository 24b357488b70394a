//! Benchmark setup error type.
//!
//! Collects the failures that can arise while preparing benchmark inputs so
//! setup functions can propagate them with `?`.

use chroma_core::{GraphError, KmerError, OracleError, UnitigError};

use crate::source::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic input generation was misconfigured.
    #[error("synthetic input generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// The generated graph was rejected.
    #[error("graph construction failed: {0}")]
    Graph(#[from] GraphError),
    /// A generated k-mer was invalid.
    #[error("k-mer construction failed: {0}")]
    Kmer(#[from] KmerError),
    /// The oracle rejected its configuration or a k-mer.
    #[error("oracle construction failed: {0}")]
    Oracle(#[from] OracleError),
    /// Unitig construction failed while warming up.
    #[error("unitig construction failed: {0}")]
    Unitig(#[from] UnitigError),
}
