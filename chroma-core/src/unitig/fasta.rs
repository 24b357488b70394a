//! FASTA output for emitted unitigs.

use std::io::Write;

use crate::error::UnitigError;

use super::{Unitig, UnitigSink};

/// Writes unitigs as `>u<n>` records numbered from 1.
///
/// # Examples
/// ```
/// use chroma_core::{FastaUnitigWriter, MphfOracleBuilder, UnitigBuilder};
///
/// let mut builder = MphfOracleBuilder::new(3)?;
/// builder.insert("ACG".parse()?, 0)?;
/// let oracle = builder.build();
///
/// let mut writer = FastaUnitigWriter::new(Vec::new());
/// UnitigBuilder::new(&oracle).build(&mut writer)?;
/// let bytes = writer.finish()?;
/// assert_eq!(String::from_utf8(bytes)?, ">u1\nACG\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct FastaUnitigWriter<W> {
    inner: W,
    next_id: u64,
}

impl<W: Write> FastaUnitigWriter<W> {
    /// Wraps `inner`; the first record is named `u1`.
    pub const fn new(inner: W) -> Self {
        Self { inner, next_id: 1 }
    }

    /// Number of records written so far.
    #[must_use]
    pub const fn records(&self) -> u64 {
        self.next_id - 1
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    /// Returns [`UnitigError::Io`] when flushing fails.
    pub fn finish(mut self) -> Result<W, UnitigError> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> UnitigSink for FastaUnitigWriter<W> {
    fn emit(&mut self, unitig: &Unitig) -> Result<(), UnitigError> {
        writeln!(self.inner, ">u{}", self.next_id)?;
        writeln!(self.inner, "{}", unitig.sequence())?;
        self.next_id += 1;
        Ok(())
    }
}
