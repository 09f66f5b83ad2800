use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, FromArgMatches, Parser};

use super::config::load_config;
use super::error::Error;
use super::loader::GraphLoader;
use super::logging::init_logging;
use super::runner::Runner;
use super::types::EngineKind;
use sssp_core::Execution;

/// Arguments shared by every engine binary: `<graph_file> <num_threads>`.
#[derive(Debug, Parser)]
#[command(version)]
pub struct EngineArgs {
    /// Graph file: a "n m" header followed by m "u v w" edge lines
    pub graph_file: PathBuf,

    /// 0 for the sequential engine, 1,2,4,8,... for the parallel engine
    pub num_threads: usize,
}

impl EngineArgs {
    /// Parses the process arguments, naming the command after `kind`'s binary.
    pub fn parse_for(kind: EngineKind) -> Result<Self, clap::Error> {
        Self::parse_from_for(kind, std::env::args_os())
    }

    pub fn parse_from_for<I, T>(kind: EngineKind, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Self::command()
            .name(kind.binary_name())
            .about(format!("Single run of the {} shortest-path engine", kind))
            .try_get_matches_from(args)?;
        Self::from_arg_matches(&matches)
    }
}

/// Entry point shared by the engine binaries.
///
/// Exit code `1` on any argument, I/O or parse error, `0` otherwise (including
/// runs that detect a negative cycle).
pub fn main_for(kind: EngineKind) -> ExitCode {
    let args = match EngineArgs::parse_for(kind) {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are not errors
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    match run(kind, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Loads config and graph, runs one engine and prints the report to stdout.
pub fn run(kind: EngineKind, args: &EngineArgs) -> Result<(), Error> {
    let config = load_config()?;
    init_logging(&config.logging.level)?;

    let loaded = GraphLoader::new(&args.graph_file).load()?;
    let execution = Execution::from_threads(args.num_threads);

    println!(
        "Graph: {} (n={}, m={})",
        args.graph_file.display(),
        loaded.num_nodes(),
        loaded.num_edges()
    );
    if kind.is_single_source() {
        println!("Source vertex: {}", config.engine.source);
    }
    println!("{}", kind.running_line(execution));

    let report = Runner::new(config.engine).run(kind, &loaded, execution)?;
    print!("{}", report);

    Ok(())
}
