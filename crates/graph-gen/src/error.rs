use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{name} must be > 0, got {value}")]
    InvalidParameter { name: &'static str, value: i64 },

    #[error("maxWeight {value} does not fit in a graph file (limit {limit})")]
    WeightOutOfRange { value: i64, limit: i32 },

    #[error("too many edges requested: {requested} (limit {limit})")]
    TooManyEdges { requested: u128, limit: usize },

    #[error("could not write {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode graph: {0}")]
    CsvError(#[from] csv::Error),
}
