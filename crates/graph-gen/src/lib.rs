//! Random graph generator producing the plain-text format the engines load.

pub mod error;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use common::types::{Edge, FileWeight, Weight};
pub use error::Error;

/// Hard cap on generated edges.
pub const MAX_EDGES: usize = 2_000_000_000;

/// Share of weights negated in mixed-sign mode, out of ten.
const NEGATIVE_SHARE: u32 = 2;

/// Parameters of one generated graph.
///
/// The output always contains a random spanning tree rooted at vertex `0`
/// (the parent of `v` is drawn from `0..v`), so every vertex is reachable
/// from `0`. Extra random edges fill the graph up to `n * avg_degree`.
///
/// With `allow_negative`, roughly 20% of weights are negated and every edge
/// goes from a lower to a higher id. The graph is then a DAG, so it has
/// negative edges but can never contain a negative cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphSpec {
    pub num_nodes: usize,
    pub avg_degree: usize,
    pub max_weight: Weight,
    pub allow_negative: bool,
    pub seed: u64,
}

impl GraphSpec {
    fn validate(&self) -> Result<(), Error> {
        let checks = [
            ("n", self.num_nodes as i64),
            ("avgDeg", self.avg_degree as i64),
            ("maxWeight", self.max_weight),
        ];
        for (name, value) in checks {
            if value <= 0 {
                return Err(Error::InvalidParameter { name, value });
            }
        }
        if self.max_weight > Weight::from(FileWeight::MAX) {
            return Err(Error::WeightOutOfRange {
                value: self.max_weight,
                limit: FileWeight::MAX,
            });
        }
        Ok(())
    }

    /// `max(n * avg_degree, n - 1)`: never fewer edges than the spanning tree needs.
    pub fn target_edges(&self) -> Result<usize, Error> {
        let requested = (self.num_nodes as u128) * (self.avg_degree as u128);
        let requested = requested.max(self.num_nodes.saturating_sub(1) as u128);

        if requested > MAX_EDGES as u128 {
            return Err(Error::TooManyEdges {
                requested,
                limit: MAX_EDGES,
            });
        }
        Ok(requested as usize)
    }

    /// Generates the edge list. Deterministic for a given spec.
    ///
    /// A single-vertex graph has no room for edges without self-loops, so it
    /// comes back empty whatever the target.
    pub fn generate(&self) -> Result<Vec<Edge>, Error> {
        self.validate()?;
        let target = self.target_edges()?;
        let n = self.num_nodes;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut edges: Vec<Edge> = Vec::with_capacity(target);

        // 1) Spanning tree to ensure connectivity; u < v keeps it acyclic.
        for v in 1..n {
            let u = rng.random_range(0..v);
            let w = self.random_weight(&mut rng);
            edges.push((u, v, w));
        }

        // 2) Extra edges up to the target
        while n >= 2 && edges.len() < target {
            let (u, v) = if self.allow_negative {
                let u = rng.random_range(0..n - 1);
                (u, rng.random_range(u + 1..n))
            } else {
                let u = rng.random_range(0..n);
                let v = rng.random_range(0..n);
                if u == v {
                    continue; // avoid self-loops
                }
                (u, v)
            };

            let w = self.random_weight(&mut rng);
            edges.push((u, v, w));
        }

        Ok(edges)
    }

    fn random_weight(&self, rng: &mut SmallRng) -> Weight {
        let base = rng.random_range(1..=self.max_weight);
        if self.allow_negative && rng.random_range(0..10) < NEGATIVE_SHARE {
            -base
        } else {
            base
        }
    }

    /// `graph_<n>.txt`
    pub fn default_file_name(&self) -> PathBuf {
        PathBuf::from(format!("graph_{}.txt", self.num_nodes))
    }
}

/// Writes `n m` followed by one `u v w` line per edge.
pub fn write_graph<W: Write>(writer: W, num_nodes: usize, edges: &[Edge]) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.serialize((num_nodes, edges.len()))?;
    for edge in edges {
        wtr.serialize(edge)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the graph into it.
pub fn write_graph_file(path: &Path, num_nodes: usize, edges: &[Edge]) -> Result<(), Error> {
    let file = File::create(path).map_err(|source| Error::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    write_graph(BufWriter::new(file), num_nodes, edges)
}
