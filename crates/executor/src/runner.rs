use std::fmt;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use super::config::EngineConfig;
use super::error::Error;
use super::loader::LoadedGraph;
use super::summary::{PairSummary, ReachSummary};
use super::types::EngineKind;
use common::types::{DistanceVector, Edge};
use sssp_core::cycle::{find_violated_edge, negative_cycle_vertices};
use sssp_core::{
    AllPairsEngine, BellmanFord, Dijkstra, DistanceMatrix, Execution, FloydWarshall, GraphCSR,
    SingleSourceEngine,
};

/// Outcome of the post-run negative-cycle check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NegativeCycle {
    /// The engine has no cycle check (Dijkstra).
    NotChecked,
    Absent,
    /// Bellman-Ford: an edge that still relaxes after `n - 1` rounds.
    ViaEdge(Edge),
    /// Floyd-Warshall: vertices with `dist[i][i] < 0`.
    OnVertices(Vec<usize>),
}

impl NegativeCycle {
    pub fn is_present(&self) -> bool {
        matches!(self, NegativeCycle::ViaEdge(_) | NegativeCycle::OnVertices(_))
    }
}

#[derive(Debug, Clone)]
pub enum EngineOutput {
    SingleSource {
        source: usize,
        distances: DistanceVector,
        summary: ReachSummary,
    },
    AllPairs {
        matrix: DistanceMatrix,
        summary: PairSummary,
    },
}

/// Everything one engine run produced.
#[derive(Debug, Clone)]
pub struct Report {
    pub engine: EngineKind,
    pub execution: Execution,
    /// Wall-clock time of the engine call alone.
    pub elapsed: Duration,
    pub output: EngineOutput,
    pub negative_cycle: NegativeCycle,
}

/// Runs one engine against a loaded graph.
pub struct Runner {
    config: EngineConfig,
}

impl Runner {
    pub fn new(config: EngineConfig) -> Self {
        Runner { config }
    }

    pub fn run(
        &self,
        kind: EngineKind,
        loaded: &LoadedGraph,
        execution: Execution,
    ) -> Result<Report, Error> {
        let graph = &loaded.graph;
        let source = self.config.source;

        let (elapsed, output, negative_cycle) = match kind {
            EngineKind::BellmanFord => {
                let engine =
                    BellmanFord::new(execution).with_chunk_size(self.config.edge_chunk_size);
                let (elapsed, distances) = timed(|| engine.shortest_paths(graph, source))?;

                let negative_cycle = match find_violated_edge(graph.edges(), &distances) {
                    Some(edge) => NegativeCycle::ViaEdge(edge),
                    None => NegativeCycle::Absent,
                };
                (elapsed, single_source(source, distances), negative_cycle)
            }
            EngineKind::Dijkstra => {
                let csr = GraphCSR::try_from(graph)?;
                let engine = Dijkstra::new(execution);
                let (elapsed, distances) = timed(|| engine.shortest_paths(&csr, source))?;

                (elapsed, single_source(source, distances), NegativeCycle::NotChecked)
            }
            EngineKind::FloydWarshall => {
                let n = graph.num_nodes();
                if n > self.config.floyd_warshall_warn_nodes {
                    warn!(
                        nodes = n,
                        "Floyd-Warshall is O(n^3); this graph may be too large"
                    );
                }

                let matrix = DistanceMatrix::try_from(graph)?;
                let engine = FloydWarshall::new(execution);
                let (elapsed, matrix) = timed(|| engine.all_pairs(matrix))?;

                let cyclic = negative_cycle_vertices(&matrix);
                let negative_cycle = if cyclic.is_empty() {
                    NegativeCycle::Absent
                } else {
                    NegativeCycle::OnVertices(cyclic)
                };
                let summary = PairSummary::from_matrix(&matrix);
                (elapsed, EngineOutput::AllPairs { matrix, summary }, negative_cycle)
            }
        };

        if negative_cycle.is_present() {
            warn!(engine = %kind, "Negative cycle detected");
        }
        info!(engine = %kind, elapsed_secs = elapsed.as_secs_f64(), "Run complete");

        Ok(Report {
            engine: kind,
            execution,
            elapsed,
            output,
            negative_cycle,
        })
    }
}

fn single_source(source: usize, distances: DistanceVector) -> EngineOutput {
    let summary = ReachSummary::from_distances(&distances);
    EngineOutput::SingleSource {
        source,
        distances,
        summary,
    }
}

fn timed<T, E>(op: impl FnOnce() -> Result<T, E>) -> Result<(Duration, T), E> {
    let start = Instant::now();
    let value = op()?;
    Ok((start.elapsed(), value))
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Time: {:.6} seconds", self.elapsed.as_secs_f64())?;

        match &self.output {
            EngineOutput::SingleSource { summary, .. } => write!(f, "{}", summary)?,
            EngineOutput::AllPairs { summary, .. } => write!(f, "{}", summary)?,
        }

        match &self.negative_cycle {
            NegativeCycle::NotChecked => Ok(()),
            NegativeCycle::Absent => writeln!(f, "  No negative weight cycle detected."),
            NegativeCycle::ViaEdge((u, v, w)) => {
                writeln!(f, "  Warning: graph contains a negative weight cycle.")?;
                writeln!(f, "  Shortest-path distances are not well-defined.")?;
                writeln!(f, "  Edge {} -> {} (weight {}) still relaxes.", u, v, w)
            }
            NegativeCycle::OnVertices(vertices) => {
                writeln!(f, "  Warning: graph contains a negative cycle.")?;
                writeln!(
                    f,
                    "  {} vertices have a negative distance to themselves.",
                    vertices.len()
                )
            }
        }
    }
}
