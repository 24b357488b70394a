//! Reader for whitespace-separated `node1 node2 weight` edge lists.
//!
//! The first line is a header and is skipped. Blank lines are ignored.

use std::{io::BufRead, str::FromStr, sync::Arc};

use bitvec::vec::BitVec;
use tracing::{info, instrument};

use crate::error::EdgeListError;

use super::{BucketedGraph, node_slot, node_slots};

/// Counters gathered while loading an edge list.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EdgeListSummary {
    /// Number of edges read.
    pub edges: u64,
    /// Number of distinct node ids that appear as an endpoint.
    pub distinct_nodes: u64,
}

/// Reads an edge list into a [`BucketedGraph`].
///
/// # Errors
/// Returns [`EdgeListError`] when the stream cannot be read, the header is
/// missing, a line is malformed, or an edge is rejected by the graph.
///
/// # Examples
/// ```
/// use chroma_core::read_edge_list;
///
/// let input = "n1 n2 w\n1 2 1\n2 3 1\n1 3 2\n";
/// let (graph, summary) = read_edge_list(input.as_bytes(), 3, 2)?;
/// assert_eq!(graph.edge_count(), 3);
/// assert_eq!(summary.distinct_nodes, 3);
/// # Ok::<(), chroma_core::EdgeListError>(())
/// ```
#[instrument(name = "msf.read_edge_list", err, skip(reader))]
pub fn read_edge_list(
    reader: impl BufRead,
    node_count: u64,
    bucket_count: usize,
) -> Result<(BucketedGraph, EdgeListSummary), EdgeListError> {
    let mut graph = BucketedGraph::new(node_count, bucket_count)
        .map_err(|source| EdgeListError::Graph { line: 0, source })?;
    let mut seen: BitVec = BitVec::repeat(false, node_slots(node_count));
    let mut summary = EdgeListSummary::default();

    let mut lines = reader.lines();
    match lines.next() {
        Some(header) => {
            header.map_err(|source| EdgeListError::Io { source })?;
        }
        None => return Err(EdgeListError::MissingHeader),
    }

    for (index, line) in lines.enumerate() {
        let line_number = index + 2;
        let text = line.map_err(|source| EdgeListError::Io { source })?;
        let Some((n1, n2, weight)) = parse_line(&text, line_number)? else {
            continue;
        };
        graph
            .add_edge(n1, n2, weight)
            .map_err(|source| EdgeListError::Graph {
                line: line_number,
                source,
            })?;
        seen.set(node_slot(n1), true);
        seen.set(node_slot(n2), true);
        summary.edges += 1;
    }

    summary.distinct_nodes = seen.count_ones() as u64;
    info!(
        edges = summary.edges,
        distinct_nodes = summary.distinct_nodes,
        "edge list loaded"
    );
    Ok((graph, summary))
}

fn parse_line(text: &str, line: usize) -> Result<Option<(u64, u64, u32)>, EdgeListError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    match fields.as_slice() {
        [] => Ok(None),
        [n1, n2, weight] => Ok(Some((
            parse_field(n1, "node1", line)?,
            parse_field(n2, "node2", line)?,
            parse_field(weight, "weight", line)?,
        ))),
        _ => Err(EdgeListError::MalformedLine {
            line,
            content: Arc::from(text),
        }),
    }
}

fn parse_field<T: FromStr>(raw: &str, field: &'static str, line: usize) -> Result<T, EdgeListError> {
    raw.parse().map_err(|_| EdgeListError::InvalidField {
        line,
        field,
        value: Arc::from(raw),
    })
}
