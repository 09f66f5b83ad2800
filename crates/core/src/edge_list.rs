use common::error::Error;
use common::types::Edge;

/// Directed edge list over vertices `0..num_nodes`.
///
/// Construction rejects any endpoint outside the vertex range, so engines can
/// index distance slots by endpoint without further checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeList {
    num_nodes: usize,
    edges: Vec<Edge>,
}

impl EdgeList {
    /// # Errors
    /// Returns `Error::NodeIndexOutOfBounds` with the offending endpoint.
    pub fn new(num_nodes: usize, edges: Vec<Edge>) -> Result<Self, Error> {
        for &(u, v, _) in &edges {
            if u >= num_nodes {
                return Err(Error::NodeIndexOutOfBounds(u));
            }
            if v >= num_nodes {
                return Err(Error::NodeIndexOutOfBounds(v));
            }
        }

        Ok(Self { num_nodes, edges })
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}
