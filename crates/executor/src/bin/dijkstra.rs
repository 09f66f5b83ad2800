use std::process::ExitCode;

use executor::{EngineKind, cli};

fn main() -> ExitCode {
    cli::main_for(EngineKind::Dijkstra)
}
