use std::path::PathBuf;

use thiserror::Error;

use common::error::Error as EngineError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not open file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read n and m from {path}")]
    InvalidHeader { path: PathBuf },

    #[error("failed to read edge {index} from {path}")]
    InvalidEdge { path: PathBuf, index: usize },

    #[error("Configuration error: {0}")]
    ConfigLoadError(String),

    #[error("Graph processing error: {0}")]
    GraphError(#[from] EngineError),
}
