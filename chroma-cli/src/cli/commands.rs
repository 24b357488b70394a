//! Command implementations and argument parsing for the chroma CLI.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use chroma_core::{
    ComponentSummary, EdgeListError, FastaUnitigWriter, MembershipOracle, MinimumSpanningForest,
    OracleError, UnitigBuilder, UnitigError, UnitigStats, read_edge_list, read_kmer_list,
};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{Span, field, info, instrument, warn};

/// File name written inside the `unitigs` output directory.
pub const UNITIG_FILE_NAME: &str = "unitigs.fa";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "chroma",
    about = "Compact colored de Bruijn graph data into spanning forests and unitigs."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build the minimum spanning forest and print a summary.
    Build(BuildCommand),
    /// Print `edges`, `weight` and `rank` for every weighted component root.
    #[command(name = "ccInfo")]
    CcInfo(CcInfoCommand),
    /// Compact a k-mer list into unitigs written as FASTA.
    Unitigs(UnitigsCommand),
}

/// Edge-list arguments shared by the forest commands.
#[derive(Debug, Args, Clone)]
pub struct GraphArgs {
    /// Edge list with a header line followed by `node1 node2 weight` rows.
    #[arg(short = 'e', long = "edge-filename")]
    pub edge_filename: PathBuf,

    /// Number of equivalence classes; node ids run from 1 to this value.
    #[arg(short = 'n', long = "eqCls-cnt")]
    pub eq_cls_cnt: u64,

    /// Number of weight buckets; weights must lie in `1..=bucket-cnt`.
    #[arg(short = 'b', long = "bucket-cnt")]
    pub bucket_cnt: NonZeroUsize,
}

/// Options accepted by the `build` command.
#[derive(Debug, Args, Clone)]
pub struct BuildCommand {
    /// Edge-list input.
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Number of samples the equivalence classes are drawn from.
    #[arg(short = 's', long = "numSamples")]
    pub num_samples: u64,

    /// Equivalence-class list, one class per line.
    #[arg(short = 'c', long = "eqCls-lst")]
    pub eq_cls_lst: PathBuf,
}

/// Options accepted by the `ccInfo` command.
#[derive(Debug, Args, Clone)]
pub struct CcInfoCommand {
    /// Edge-list input.
    #[command(flatten)]
    pub graph: GraphArgs,
}

/// Options accepted by the `unitigs` command.
#[derive(Debug, Args, Clone)]
pub struct UnitigsCommand {
    /// K-mer list: one k-mer per line with an optional color id.
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Directory receiving `unitigs.fa`; created when missing.
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: PathBuf,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The edge list could not be loaded.
    #[error("edge list `{path}`: {source}")]
    EdgeList {
        /// Edge-list path.
        path: PathBuf,
        /// Loader failure.
        #[source]
        source: EdgeListError,
    },
    /// Building the forest failed.
    #[error(transparent)]
    Graph(#[from] chroma_core::GraphError),
    /// The k-mer list could not be loaded.
    #[error("k-mer list `{path}`: {source}")]
    KmerList {
        /// K-mer list path.
        path: PathBuf,
        /// Loader failure.
        #[source]
        source: OracleError,
    },
    /// Unitig compaction or output failed.
    #[error("unitig output `{path}`: {source}")]
    Unitig {
        /// Output path.
        path: PathBuf,
        /// Compaction failure.
        #[source]
        source: UnitigError,
    },
}

impl CliError {
    /// Stable machine-readable code of the underlying failure.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "CLI_IO",
            Self::EdgeList { source, .. } => source.code().as_str(),
            Self::Graph(source) => source.code().as_str(),
            Self::KmerList { source, .. } => source.code().as_str(),
            Self::Unitig { source, .. } => source.code().as_str(),
        }
    }
}

/// Totals printed by the `build` command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BuildSummary {
    /// Trees among node ids `1..=n`, singletons included.
    pub components: usize,
    /// Edges merged into the forest.
    pub merged_edges: u64,
    /// Sum of merged edge weights.
    pub total_weight: u64,
    /// Distinct endpoints of merged edges.
    pub distinct_nodes: u64,
    /// Records found in the equivalence-class list.
    pub eq_classes: u64,
    /// Sample count passed on the command line.
    pub samples: u64,
}

/// Totals printed by the `unitigs` command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnitigSummary {
    /// FASTA file that received the unitigs.
    pub output: PathBuf,
    /// Compaction counters.
    pub stats: UnitigStats,
}

/// Result of one command, ready to be rendered.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CommandOutput {
    /// Output of `build`.
    Build(BuildSummary),
    /// Output of `ccInfo`.
    CcInfo(Vec<ComponentSummary>),
    /// Output of `unitigs`.
    Unitigs(UnitigSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when an input cannot be read or a build fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::num::NonZeroUsize;
/// # use chroma_cli::cli::{CcInfoCommand, Cli, Command, CommandOutput, GraphArgs, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "n1 n2 w\n1 2 1\n2 3 1\n1 3 2\n")?;
/// let cli = Cli {
///     command: Command::CcInfo(CcInfoCommand {
///         graph: GraphArgs {
///             edge_filename: file.path().to_path_buf(),
///             eq_cls_cnt: 3,
///             bucket_cnt: NonZeroUsize::new(2).ok_or("zero")?,
///         },
///     }),
/// };
/// let CommandOutput::CcInfo(roots) = run_cli(cli)? else {
///     return Err("unexpected output".into());
/// };
/// assert_eq!((roots[0].edges, roots[0].weight), (2, 2));
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<CommandOutput, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Build(command) => {
            span.record("command", "build");
            run_build(&command).map(CommandOutput::Build)
        }
        Command::CcInfo(command) => {
            span.record("command", "ccInfo");
            run_cc_info(&command).map(CommandOutput::CcInfo)
        }
        Command::Unitigs(command) => {
            span.record("command", "unitigs");
            run_unitigs(&command).map(CommandOutput::Unitigs)
        }
    }
}

#[instrument(name = "cli.build", err, skip(command), fields(samples = command.num_samples))]
pub(super) fn run_build(command: &BuildCommand) -> Result<BuildSummary, CliError> {
    let eq_classes = count_records(&command.eq_cls_lst)?;
    if eq_classes != command.graph.eq_cls_cnt {
        warn!(
            listed = eq_classes,
            expected = command.graph.eq_cls_cnt,
            "equivalence-class list disagrees with --eqCls-cnt"
        );
    }

    let msf = build_forest(&command.graph)?;
    let forest = msf.forest();
    let summary = BuildSummary {
        components: forest.component_count(),
        merged_edges: forest.total_merges(),
        total_weight: forest.total_weight(),
        distinct_nodes: msf.stats().distinct_nodes,
        eq_classes,
        samples: command.num_samples,
    };
    info!(
        components = summary.components,
        total_weight = summary.total_weight,
        "build completed"
    );
    Ok(summary)
}

#[instrument(name = "cli.cc_info", err, skip(command))]
pub(super) fn run_cc_info(command: &CcInfoCommand) -> Result<Vec<ComponentSummary>, CliError> {
    let msf = build_forest(&command.graph)?;
    let roots: Vec<_> = msf.forest().weighted_roots().collect();
    info!(roots = roots.len(), "component summaries collected");
    Ok(roots)
}

#[instrument(
    name = "cli.unitigs",
    err,
    skip(command),
    fields(input = %command.input.display(), output_dir = %command.output_dir.display()),
)]
pub(super) fn run_unitigs(command: &UnitigsCommand) -> Result<UnitigSummary, CliError> {
    let reader = open_reader(&command.input)?;
    let oracle = read_kmer_list(reader)
        .map_err(|source| CliError::KmerList {
            path: command.input.clone(),
            source,
        })?
        .build();

    fs::create_dir_all(&command.output_dir).map_err(|source| CliError::Io {
        path: command.output_dir.clone(),
        source,
    })?;
    let output = command.output_dir.join(UNITIG_FILE_NAME);
    let stats = write_unitigs(&oracle, &output)?;
    Ok(UnitigSummary { output, stats })
}

/// Compacts `oracle` into a FASTA file at `path`, deleting the file if any
/// step fails.
pub(super) fn write_unitigs<O: MembershipOracle>(
    oracle: &O,
    path: &Path,
) -> Result<UnitigStats, CliError> {
    let file = File::create(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = FastaUnitigWriter::new(BufWriter::new(file));
    let result = UnitigBuilder::new(oracle)
        .build(&mut writer)
        .and_then(|stats| writer.finish().map(|_| stats));

    result.map_err(|source| {
        if let Err(err) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %err, "failed to remove partial unitig output");
        }
        CliError::Unitig {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn build_forest(args: &GraphArgs) -> Result<MinimumSpanningForest, CliError> {
    let reader = open_reader(&args.edge_filename)?;
    let (graph, loaded) = read_edge_list(reader, args.eq_cls_cnt, args.bucket_cnt.get())
        .map_err(|source| CliError::EdgeList {
            path: args.edge_filename.clone(),
            source,
        })?;
    info!(
        edges = loaded.edges,
        distinct_nodes = loaded.distinct_nodes,
        "graph ready"
    );
    Ok(graph.kruskal_msf()?)
}

#[instrument(name = "cli.open_reader", err, fields(path = %path.display()))]
pub(super) fn open_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Counts non-blank lines of the equivalence-class list.
pub(super) fn count_records(path: &Path) -> Result<u64, CliError> {
    let mut records = 0;
    for line in open_reader(path)?.lines() {
        let line = line.map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if !line.trim().is_empty() {
            records += 1;
        }
    }
    Ok(records)
}

/// Renders `output` to `writer`.
///
/// `ccInfo` prints one `edges\tweight\trank` row per root; the other
/// commands print `label: value` lines.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use chroma_cli::cli::{CommandOutput, render_output};
/// # use chroma_core::ComponentSummary;
/// let output = CommandOutput::CcInfo(vec![ComponentSummary {
///     root: 1,
///     edges: 2,
///     weight: 2,
///     rank: 1,
/// }]);
/// let mut buffer = Vec::new();
/// render_output(&output, &mut buffer)?;
/// assert_eq!(buffer, b"2\t2\t1\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn render_output(output: &CommandOutput, mut writer: impl Write) -> io::Result<()> {
    match output {
        CommandOutput::Build(summary) => {
            writeln!(writer, "components: {}", summary.components)?;
            writeln!(writer, "merged edges: {}", summary.merged_edges)?;
            writeln!(writer, "total weight: {}", summary.total_weight)?;
            writeln!(writer, "distinct nodes: {}", summary.distinct_nodes)?;
            writeln!(writer, "equivalence classes: {}", summary.eq_classes)?;
            writeln!(writer, "samples: {}", summary.samples)?;
        }
        CommandOutput::CcInfo(roots) => {
            for root in roots {
                writeln!(writer, "{}\t{}\t{}", root.edges, root.weight, root.rank)?;
            }
        }
        CommandOutput::Unitigs(summary) => {
            writeln!(writer, "unitigs: {}", summary.stats.unitigs)?;
            writeln!(writer, "kmers visited: {}", summary.stats.kmers_visited)?;
            writeln!(writer, "output: {}", summary.output.display())?;
        }
    }
    Ok(())
}
