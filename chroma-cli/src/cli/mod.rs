//! Command-line interface for the chroma compaction tools.
//!
//! `build` and `ccInfo` run the bucketed minimum spanning forest over an
//! equivalence-class edge list; `unitigs` compacts a k-mer list into FASTA.

mod commands;

pub use commands::{
    BuildCommand, BuildSummary, CcInfoCommand, Cli, CliError, Command, CommandOutput, GraphArgs,
    UNITIG_FILE_NAME, UnitigSummary, UnitigsCommand, render_output, run_cli,
};

#[cfg(test)]
mod test_helpers;
