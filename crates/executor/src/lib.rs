//! Command-line front end for the shortest-path engines: graph loading,
//! configuration, logging, the run report and the shared CLI used by the
//! `bellman_ford`, `dijkstra` and `floyd_warshall` binaries.

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod runner;
pub mod summary;
pub mod types;

pub use error::Error;
pub use types::EngineKind;
