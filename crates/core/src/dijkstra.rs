use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::csr::GraphCSR;
use super::execution::{Execution, WorkerPool};
use super::traits::{RoundObserver, SingleSourceEngine, initial_distances};
use common::{
    error::Error,
    types::{Distance, DistanceVector, INF, path_candidate},
};

/// Dense-selection Dijkstra over a CSR graph (no heap).
///
/// Every round scans all unvisited vertices for the smallest tentative
/// distance, then relaxes that vertex's out-edges. Only the scan is
/// parallelized: round `k + 1` cannot start before round `k`'s relax step has
/// finished, so the relax stays on the calling thread.
///
/// Requires non-negative weights. Negative weights are logged and the
/// algorithm runs anyway; the result is then not guaranteed to be correct.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra {
    execution: Execution,
}

/// `(distance, vertex)` candidate; tuple order breaks ties toward the lower id.
type Selection = Option<(Distance, usize)>;

impl Dijkstra {
    pub fn new(execution: Execution) -> Self {
        Self { execution }
    }

    pub fn sequential() -> Self {
        Self::new(Execution::Sequential)
    }

    pub fn execution(&self) -> Execution {
        self.execution
    }

    fn select(
        &self,
        pool: Option<&WorkerPool>,
        dist: &[Distance],
        visited: &[bool],
    ) -> Option<usize> {
        let best = match pool {
            None => local_minimum(dist, visited, 0),
            Some(pool) => {
                let slice_len = dist.len().div_ceil(pool.workers()).max(1);
                pool.install(|| {
                    dist.par_chunks(slice_len)
                        .zip(visited.par_chunks(slice_len))
                        .enumerate()
                        .map(|(slice, (dist, visited))| {
                            local_minimum(dist, visited, slice * slice_len)
                        })
                        .reduce(|| None, min_with_index)
                })
            }
        };
        best.map(|(_, v)| v)
    }
}

impl SingleSourceEngine for Dijkstra {
    type Graph = GraphCSR;

    fn shortest_paths_observed<O: RoundObserver>(
        &self,
        graph: &GraphCSR,
        source: usize,
        observer: &mut O,
    ) -> Result<DistanceVector, Error> {
        let mut dist = initial_distances(graph.num_nodes, source)?;
        let pool = self.execution.worker_pool()?;

        let negative = graph.negative_weight_count();
        if negative > 0 {
            warn!(
                negative_edges = negative,
                "Graph has negative weights. Dijkstra is not valid for negative edges."
            );
        }

        info!(
            nodes = graph.num_nodes,
            edges = graph.num_edges(),
            source,
            mode = %self.execution,
            "Running Dijkstra"
        );

        let mut visited = vec![false; graph.num_nodes];
        let mut settled = 0;

        for round in 0..graph.num_nodes {
            // no more reachable vertices
            let Some(u) = self.select(pool.as_ref(), &dist, &visited) else {
                break;
            };

            visited[u] = true;
            settled += 1;

            let dist_u = dist[u];
            for (v, w) in graph.out_edges(u) {
                if let Some(candidate) = path_candidate(dist_u, w) {
                    if candidate < dist[v] {
                        dist[v] = candidate;
                    }
                }
            }

            if observer.wants_snapshots() {
                observer.on_round(round, &dist);
            }
            debug!(round, vertex = u, distance = dist_u, "Dijkstra settled vertex");
        }

        info!(settled, "Dijkstra finished");
        Ok(dist)
    }
}

/// Smallest reached, unvisited `(distance, vertex)` in one slice.
/// `offset` is the vertex id of the slice's first element.
fn local_minimum(dist: &[Distance], visited: &[bool], offset: usize) -> Selection {
    let mut best: Selection = None;
    for (i, (&d, &done)) in dist.iter().zip(visited).enumerate() {
        if done || d >= INF {
            continue;
        }
        // strict < keeps the first (lowest id) vertex on ties
        if best.is_none_or(|(best_d, _)| d < best_d) {
            best = Some((d, offset + i));
        }
    }
    best
}

/// Reduction step combining two per-slice minima.
fn min_with_index(a: Selection, b: Selection) -> Selection {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

#[cfg(test)]
mod dijkstra_tests {
    use super::*;
    use common::types::Edge;
    use parking_lot::Mutex;
    use std::io;
    use std::sync::Arc;

    fn build_graph(num_nodes: usize, edges: &[Edge]) -> GraphCSR {
        GraphCSR::from_edges(num_nodes, edges).unwrap()
    }

    fn engines() -> Vec<Dijkstra> {
        vec![
            Dijkstra::sequential(),
            Dijkstra::new(Execution::from_threads(1)),
            Dijkstra::new(Execution::from_threads(3)),
            Dijkstra::new(Execution::from_threads(16)),
        ]
    }

    #[test]
    fn small_graph_matches_expected_distances() {
        let graph = build_graph(4, &[(0, 1, 1), (1, 2, 2), (0, 2, 5), (2, 3, 1)]);

        for engine in engines() {
            let dist = engine.shortest_paths(&graph, 0).unwrap();
            assert_eq!(dist, vec![0, 1, 3, 4], "mode: {}", engine.execution());
        }
    }

    #[test]
    fn disconnected_vertex_stays_unreached() {
        let graph = build_graph(3, &[(0, 1, 4)]);

        for engine in engines() {
            assert_eq!(engine.shortest_paths(&graph, 0).unwrap(), vec![0, 4, INF]);
        }
    }

    #[test]
    fn single_node_graph() {
        let graph = build_graph(1, &[]);

        for engine in engines() {
            assert_eq!(engine.shortest_paths(&graph, 0).unwrap(), vec![0]);
        }
    }

    #[test]
    fn non_zero_source() {
        let graph = build_graph(4, &[(2, 0, 3), (2, 1, 9), (0, 1, 2), (1, 3, 1)]);

        for engine in engines() {
            assert_eq!(engine.shortest_paths(&graph, 2).unwrap(), vec![3, 5, 0, 6]);
        }
    }

    #[test]
    fn zero_weight_edges() {
        let graph = build_graph(3, &[(0, 1, 0), (1, 2, 0), (0, 2, 1)]);

        for engine in engines() {
            assert_eq!(engine.shortest_paths(&graph, 0).unwrap(), vec![0, 0, 0]);
        }
    }

    #[test]
    fn stops_once_remaining_vertices_are_unreachable() {
        struct Rounds(usize);
        impl RoundObserver for Rounds {
            fn on_round(&mut self, _round: usize, _distances: &[Distance]) {
                self.0 += 1;
            }
        }

        let graph = build_graph(5, &[(0, 1, 1), (3, 4, 1)]);
        for engine in engines() {
            let mut rounds = Rounds(0);
            engine
                .shortest_paths_observed(&graph, 0, &mut rounds)
                .unwrap();
            assert_eq!(rounds.0, 2);
        }
    }

    #[test]
    fn negative_weights_still_run() {
        let graph = build_graph(3, &[(0, 1, 2), (1, 2, -1)]);

        for engine in engines() {
            assert_eq!(engine.shortest_paths(&graph, 0).unwrap(), vec![0, 2, 1]);
        }
    }

    /// Log sink shared between the subscriber and the test.
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs `op` under a thread-local subscriber and returns what it logged.
    fn captured_logs(op: impl FnOnce()) -> String {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buffer);
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || LogBuffer(Arc::clone(&sink)))
            .with_ansi(false)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, op);

        let bytes = buffer.lock().clone();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn negative_weights_are_warned_about() {
        let graph = build_graph(3, &[(0, 1, 2), (1, 2, -1), (0, 2, -4)]);

        for engine in engines() {
            let logs = captured_logs(|| {
                engine.shortest_paths(&graph, 0).unwrap();
            });

            assert!(logs.contains("WARN"), "mode: {}", engine.execution());
            assert!(logs.contains("Dijkstra is not valid for negative edges"));
            assert!(logs.contains("negative_edges=2"));
        }
    }

    #[test]
    fn non_negative_weights_run_without_warning() {
        let graph = build_graph(3, &[(0, 1, 2), (1, 2, 0)]);

        let logs = captured_logs(|| {
            Dijkstra::sequential().shortest_paths(&graph, 0).unwrap();
        });

        assert!(logs.contains("Running Dijkstra"));
        assert!(!logs.contains("WARN"));
    }

    #[test]
    fn empty_graph_returns_error() {
        let graph = build_graph(0, &[]);
        assert_eq!(
            Dijkstra::sequential().shortest_paths(&graph, 0),
            Err(Error::EmptyGraph)
        );
    }

    #[test]
    fn source_out_of_bounds_returns_error() {
        let graph = build_graph(3, &[]);
        assert_eq!(
            Dijkstra::new(Execution::from_threads(2)).shortest_paths(&graph, 7),
            Err(Error::NodeIndexOutOfBounds(7))
        );
    }

    // ----------------------------
    // Selection step
    // ----------------------------

    #[test]
    fn local_minimum_skips_visited_and_unreached() {
        let dist = [5, 1, INF, 3];
        let visited = [false, true, false, false];

        assert_eq!(local_minimum(&dist, &visited, 10), Some((3, 13)));
    }

    #[test]
    fn local_minimum_prefers_lowest_id_on_ties() {
        let dist = [4, 2, 2];
        assert_eq!(local_minimum(&dist, &[false; 3], 0), Some((2, 1)));
    }

    #[test]
    fn local_minimum_of_exhausted_slice_is_none() {
        assert_eq!(local_minimum(&[INF, 7], &[false, true], 0), None);
        assert_eq!(local_minimum(&[], &[], 0), None);
    }

    #[test]
    fn min_with_index_combines_partials() {
        assert_eq!(min_with_index(None, None), None);
        assert_eq!(min_with_index(Some((3, 9)), None), Some((3, 9)));
        assert_eq!(min_with_index(None, Some((3, 9))), Some((3, 9)));
        assert_eq!(min_with_index(Some((3, 9)), Some((3, 2))), Some((3, 2)));
        assert_eq!(min_with_index(Some((1, 9)), Some((3, 2))), Some((1, 9)));
    }

    #[test]
    fn parallel_selection_matches_sequential_on_ties() {
        // Many equal-weight edges out of the source produce long runs of ties.
        let n = 200;
        let edges: Vec<Edge> = (1..n)
            .map(|v| (0, v, (v % 3) as i64 + 1))
            .chain((1..n - 1).map(|v| (v, v + 1, 1)))
            .collect();
        let graph = build_graph(n, &edges);

        let expected = Dijkstra::sequential().shortest_paths(&graph, 0).unwrap();
        for threads in [2, 5, 7] {
            let engine = Dijkstra::new(Execution::from_threads(threads));
            assert_eq!(engine.shortest_paths(&graph, 0).unwrap(), expected);
        }
    }
}
