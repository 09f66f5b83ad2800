use common::error::Error;
use common::types::{Distance, Edge, INF};

use super::buffer::try_filled;
use super::edge_list::EdgeList;

/// Dense `n × n` distance matrix stored row-major in a single buffer.
///
/// Row `i` occupies `cells[i * n..(i + 1) * n]`, so a row split with
/// `chunks_mut(n)` hands every worker exclusive ownership of whole rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    num_nodes: usize,
    cells: Vec<Distance>,
}

impl DistanceMatrix {
    /// Matrix with `0` on the diagonal and `INF` everywhere else.
    ///
    /// # Errors
    /// Returns `Error::GraphTooLarge` if `n * n` overflows or cannot be allocated.
    pub fn new(num_nodes: usize) -> Result<Self, Error> {
        let mut cells = try_filled(num_nodes.checked_mul(num_nodes), INF, num_nodes)?;
        for i in 0..num_nodes {
            cells[i * num_nodes + i] = 0;
        }
        Ok(Self { num_nodes, cells })
    }

    /// Builds the initial matrix from direct edge weights.
    ///
    /// Parallel edges keep the smallest weight; a negative self-loop lowers the
    /// diagonal below zero.
    ///
    /// # Errors
    /// Returns `Error::NodeIndexOutOfBounds` if an endpoint is `>= num_nodes`,
    /// `Error::GraphTooLarge` if the matrix cannot be allocated.
    pub fn from_edges(num_nodes: usize, edges: &[Edge]) -> Result<Self, Error> {
        let out_of_range = edges
            .iter()
            .find(|&&(u, v, _)| u >= num_nodes || v >= num_nodes);
        if let Some(&(u, v, _)) = out_of_range {
            return Err(Error::NodeIndexOutOfBounds(u.max(v)));
        }

        let mut matrix = Self::new(num_nodes)?;
        matrix.insert_edges(edges);
        Ok(matrix)
    }

    /// Endpoints must already be in range.
    fn insert_edges(&mut self, edges: &[Edge]) {
        let n = self.num_nodes;
        for &(u, v, w) in edges {
            let cell = &mut self.cells[u * n + v];
            *cell = (*cell).min(w);
        }
    }

    /// Wraps an existing row-major buffer.
    ///
    /// # Errors
    /// Returns `Error::MatrixShape` if `cells.len() != num_nodes * num_nodes`.
    pub fn from_cells(num_nodes: usize, cells: Vec<Distance>) -> Result<Self, Error> {
        if num_nodes.checked_mul(num_nodes) != Some(cells.len()) {
            return Err(Error::MatrixShape {
                nodes: num_nodes,
                cells: cells.len(),
            });
        }
        Ok(Self { num_nodes, cells })
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// # Panics
    /// Panics if `i` or `j` is out of range.
    pub fn get(&self, i: usize, j: usize) -> Distance {
        assert!(j < self.num_nodes, "column {j} out of range");
        self.cells[i * self.num_nodes + j]
    }

    pub fn row(&self, i: usize) -> &[Distance] {
        &self.cells[i * self.num_nodes..(i + 1) * self.num_nodes]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Distance]> {
        // chunks(0) panics, and an empty matrix has no rows anyway.
        self.cells.chunks(self.num_nodes.max(1))
    }

    pub fn diagonal(&self) -> impl Iterator<Item = Distance> + '_ {
        (0..self.num_nodes).map(|i| self.cells[i * self.num_nodes + i])
    }

    pub fn as_slice(&self) -> &[Distance] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Distance] {
        &mut self.cells
    }
}

impl TryFrom<&EdgeList> for DistanceMatrix {
    type Error = Error;

    fn try_from(graph: &EdgeList) -> Result<Self, Error> {
        let mut matrix = Self::new(graph.num_nodes())?;
        matrix.insert_edges(graph.edges());
        Ok(matrix)
    }
}
