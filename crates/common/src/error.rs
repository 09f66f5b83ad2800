use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Indicates an attempt to access a node index that exceeds the graph size (N).
    NodeIndexOutOfBounds(usize),

    /// The engine was handed a graph with zero vertices.
    EmptyGraph,

    /// A distance matrix whose backing storage does not hold `n * n` cells.
    MatrixShape { nodes: usize, cells: usize },

    /// The per-invocation worker pool could not be built.
    ThreadPool(String),

    /// Buffers sized by the vertex count overflow `usize` or cannot be allocated.
    GraphTooLarge { nodes: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NodeIndexOutOfBounds(n) => write!(f, "Node index {} is out of bounds.", n),

            Error::EmptyGraph => write!(f, "Graph has no vertices."),

            Error::MatrixShape { nodes, cells } => write!(
                f,
                "Distance matrix for {} nodes needs {} cells, found {}.",
                nodes,
                nodes.saturating_mul(*nodes),
                cells
            ),

            Error::ThreadPool(reason) => write!(f, "Failed to build worker pool: {}", reason),

            Error::GraphTooLarge { nodes } => {
                write!(f, "Graph with {} nodes is too large to allocate.", nodes)
            }
        }
    }
}

impl std::error::Error for Error {}
