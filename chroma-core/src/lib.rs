//! Chroma core library.
//!
//! Two independent graph compactions over colored de Bruijn graph data:
//! a bucketed Kruskal minimum spanning forest over an integer-weighted edge
//! list, and unitig compaction of the k-mer graph implied by a membership
//! oracle.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod forest;
mod kmer;
mod msf;
mod oracle;
mod unitig;

#[cfg(test)]
mod test_utils;

pub use crate::{
    error::{
        EdgeListError, EdgeListErrorCode, ForestError, ForestErrorCode, GraphError,
        GraphErrorCode, KmerError, KmerErrorCode, OracleError, OracleErrorCode, UnitigError,
        UnitigErrorCode,
    },
    forest::{ComponentSummary, DisjointSetNode, DisjointSets},
    kmer::{Base, CanonicalKmer, Kmer, MAX_K},
    msf::{
        BucketedGraph, Edge, EdgeListSummary, MinimumSpanningForest, MsfStats,
        PROGRESS_INTERVAL, read_edge_list,
    },
    oracle::{ColorId, MembershipOracle, MphfOracle, MphfOracleBuilder, read_kmer_list},
    unitig::{FastaUnitigWriter, Unitig, UnitigBuilder, UnitigSink, UnitigStats},
};
