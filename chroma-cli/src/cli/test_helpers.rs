//! Small helpers shared across CLI tests.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use chroma_test_support::fixtures::FixtureDir;

use super::{BuildCommand, CcInfoCommand, Cli, CliError, Command, GraphArgs, UnitigsCommand, run_cli};

pub(super) fn fixture_dir() -> FixtureDir {
    match FixtureDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn graph_args(edge_filename: PathBuf, eq_cls_cnt: u64, bucket_cnt: usize) -> GraphArgs {
    GraphArgs {
        edge_filename,
        eq_cls_cnt,
        bucket_cnt: NonZeroUsize::new(bucket_cnt).expect("bucket count must be positive"),
    }
}

pub(super) fn build_cli(graph: GraphArgs, num_samples: u64, eq_cls_lst: PathBuf) -> Cli {
    Cli {
        command: Command::Build(BuildCommand {
            graph,
            num_samples,
            eq_cls_lst,
        }),
    }
}

pub(super) fn cc_info_cli(graph: GraphArgs) -> Cli {
    Cli {
        command: Command::CcInfo(CcInfoCommand { graph }),
    }
}

pub(super) fn unitigs_cli(input: PathBuf, output_dir: PathBuf) -> Cli {
    Cli {
        command: Command::Unitigs(UnitigsCommand { input, output_dir }),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(output) => panic!("{panic_msg}: got {output:?}"),
        Err(err) => err,
    }
}
