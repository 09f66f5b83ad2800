use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use graph_gen::{Error, GraphSpec, write_graph_file};

/// Generate a random directed graph for the shortest-path engines
#[derive(Debug, Parser)]
#[command(name = "generate_graph", version)]
struct Args {
    /// Number of vertices
    n: usize,

    /// Average out-degree; the graph gets max(n * avg_deg, n - 1) edges
    avg_deg: usize,

    /// Weights are drawn from 1..=max_weight (at most 2147483647)
    max_weight: i64,

    /// 1 negates ~20% of weights and keeps the graph acyclic
    #[arg(value_parser = clap::value_parser!(u8).range(0..=1))]
    neg_flag: u8,

    /// Random seed
    seed: u64,

    /// Output file [default: graph_<n>.txt]
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let spec = GraphSpec {
        num_nodes: args.n,
        avg_degree: args.avg_deg,
        max_weight: args.max_weight,
        allow_negative: args.neg_flag == 1,
        seed: args.seed,
    };
    let output = args.output.clone().unwrap_or_else(|| spec.default_file_name());

    let start = Instant::now();
    let edges = spec.generate()?;
    info!(edges = edges.len(), elapsed = ?start.elapsed(), "Edges generated");

    write_graph_file(&output, spec.num_nodes, &edges)?;

    println!(
        "Generated graph with {} nodes and {} edges into {}",
        spec.num_nodes,
        edges.len(),
        output.display()
    );
    Ok(())
}
