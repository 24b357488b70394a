//! Loader for plain-text k-mer lists.
//!
//! Each non-blank line holds one k-mer, optionally followed by whitespace and
//! a numeric color id (default 0). The first k-mer fixes k for the file.

use std::{io::BufRead, sync::Arc};

use tracing::{info, instrument};

use crate::{error::OracleError, kmer::Kmer};

use super::{ColorId, MphfOracleBuilder};

/// Reads a k-mer list into a builder ready to be hashed.
///
/// # Errors
/// Returns [`OracleError::Io`] on read failures, [`OracleError::Kmer`] or
/// [`OracleError::InvalidColor`] for unparseable lines,
/// [`OracleError::MismatchedK`] when lengths disagree, and
/// [`OracleError::Empty`] when the list holds no k-mers.
///
/// # Examples
/// ```
/// use chroma_core::read_kmer_list;
///
/// let builder = read_kmer_list("AAAA\nAAAT 2\n\nAATG\n".as_bytes())?;
/// assert_eq!(builder.k(), 4);
/// assert_eq!(builder.len(), 3);
/// # Ok::<(), chroma_core::OracleError>(())
/// ```
#[instrument(name = "oracle.read_kmer_list", err, skip(reader))]
pub fn read_kmer_list(reader: impl BufRead) -> Result<MphfOracleBuilder, OracleError> {
    let mut builder: Option<MphfOracleBuilder> = None;
    let mut records = 0_u64;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let text = line.map_err(|source| OracleError::Io { source })?;
        let Some((kmer, color)) = parse_line(&text, line_number)? else {
            continue;
        };
        if builder.is_none() {
            builder = Some(MphfOracleBuilder::new(kmer.k())?);
        }
        if let Some(target) = builder.as_mut() {
            target.insert(kmer, color)?;
        }
        records += 1;
    }

    let builder = builder.ok_or(OracleError::Empty)?;
    info!(
        records,
        distinct = builder.len(),
        k = builder.k(),
        "k-mer list loaded"
    );
    Ok(builder)
}

fn parse_line(text: &str, line: usize) -> Result<Option<(Kmer, ColorId)>, OracleError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let (sequence, rest) = trimmed
        .split_once(char::is_whitespace)
        .map_or((trimmed, ""), |(sequence, rest)| (sequence, rest.trim()));

    let kmer = sequence
        .parse::<Kmer>()
        .map_err(|source| OracleError::Kmer { line, source })?;
    let color = if rest.is_empty() {
        0
    } else {
        rest.parse().map_err(|_| OracleError::InvalidColor {
            line,
            value: Arc::from(rest),
        })?
    };
    Ok(Some((kmer, color)))
}
