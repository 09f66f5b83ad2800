use common::error::Error;
use common::types::{Edge, Weight};

use super::buffer::try_filled;
use super::edge_list::EdgeList;

/// Graph in Compressed Sparse Row (CSR) format for fast graph traversal.
///
/// CSR format stores outgoing edges of each node contiguously in memory:
/// - `node_pointers[u]..node_pointers[u+1]` → edges from node `u`
/// - `edge_targets[i]` -> target node of edge `i`
/// - `edge_weights[i]` -> weight of edge `i`
///
/// Dijkstra only ever touches the out-edges of the vertex it just selected, so
/// this layout keeps each relax step a single contiguous scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphCSR {
    pub num_nodes: usize,
    pub node_pointers: Vec<usize>,
    pub edge_targets: Vec<usize>,
    pub edge_weights: Vec<Weight>,
}

impl GraphCSR {
    /// Creates a new CSR graph from a list of edges `(src, dst, weight)`.
    ///
    /// Edges of the same source keep their input order.
    ///
    /// # Errors
    /// Returns `Error::NodeIndexOutOfBounds` if any endpoint is `>= num_nodes`,
    /// `Error::GraphTooLarge` if the offset array cannot be allocated.
    pub fn from_edges(num_nodes: usize, edges: &[Edge]) -> Result<Self, Error> {
        let out_of_range = edges
            .iter()
            .find(|&&(u, v, _)| u >= num_nodes || v >= num_nodes);
        if let Some(&(u, v, _)) = out_of_range {
            return Err(Error::NodeIndexOutOfBounds(u.max(v)));
        }

        Self::build_csr_from_edges(num_nodes, edges)
    }

    /// Internal helper to construct the CSR arrays.
    ///
    /// Uses the two-pass counting technique: count out-degrees into
    /// `node_pointers[u + 1]`, prefix-sum them into offsets, then scatter each
    /// edge into the next free slot of its source block.
    fn build_csr_from_edges(num_nodes: usize, edges: &[Edge]) -> Result<Self, Error> {
        let m = edges.len();
        let mut node_pointers = try_filled(num_nodes.checked_add(1), 0, num_nodes)?;

        for &(u, _, _) in edges {
            node_pointers[u + 1] += 1;
        }

        for i in 1..=num_nodes {
            node_pointers[i] += node_pointers[i - 1];
        }

        let mut edge_targets = vec![0; m];
        let mut edge_weights = vec![0; m];

        let mut cursor = node_pointers.clone();

        for &(u, v, weight) in edges {
            let pos = cursor[u]; // Get the next available position for node 'u'
            edge_targets[pos] = v;
            edge_weights[pos] = weight;

            cursor[u] += 1;
        }

        Ok(Self {
            num_nodes,
            node_pointers,
            edge_targets,
            edge_weights,
        })
    }

    pub fn num_edges(&self) -> usize {
        self.edge_targets.len()
    }

    /// Outgoing `(target, weight)` pairs of `u`.
    ///
    /// # Panics
    /// Panics if `u >= num_nodes`.
    pub fn out_edges(&self, u: usize) -> impl Iterator<Item = (usize, Weight)> + '_ {
        let start = self.node_pointers[u];
        let end = self.node_pointers[u + 1];
        self.edge_targets[start..end]
            .iter()
            .copied()
            .zip(self.edge_weights[start..end].iter().copied())
    }

    /// Number of edges with a strictly negative weight.
    pub fn negative_weight_count(&self) -> usize {
        self.edge_weights.iter().filter(|&&w| w < 0).count()
    }
}

impl TryFrom<&EdgeList> for GraphCSR {
    type Error = Error;

    fn try_from(graph: &EdgeList) -> Result<Self, Error> {
        // EdgeList already guarantees every endpoint is in range.
        Self::build_csr_from_edges(graph.num_nodes(), graph.edges())
    }
}
