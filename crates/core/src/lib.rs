//! Shortest-path engines over weighted directed graphs.
//!
//! Three algorithms, each with a sequential baseline and a variant running on
//! an explicitly sized worker pool:
//!
//! - [`BellmanFord`] relaxes an [`EdgeList`] with per-vertex write locks.
//! - [`Dijkstra`] selects vertices over a [`GraphCSR`] with a parallel min-reduction.
//! - [`FloydWarshall`] relaxes a [`DistanceMatrix`] with rows split across workers.
//!
//! Both variants of an engine return identical results for the same input,
//! independent of the thread count.

pub mod bellman_ford;
mod buffer;
pub mod csr;
pub mod cycle;
pub mod dijkstra;
pub mod edge_list;
pub mod execution;
pub mod floyd_warshall;
pub mod matrix;
pub mod traits;

pub use bellman_ford::BellmanFord;
pub use csr::GraphCSR;
pub use dijkstra::Dijkstra;
pub use edge_list::EdgeList;
pub use execution::Execution;
pub use floyd_warshall::FloydWarshall;
pub use matrix::DistanceMatrix;
pub use traits::{AllPairsEngine, RoundObserver, SingleSourceEngine};
