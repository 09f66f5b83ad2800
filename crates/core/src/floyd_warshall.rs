use rayon::prelude::*;
use tracing::{debug, info};

use super::execution::Execution;
use super::matrix::DistanceMatrix;
use super::traits::{AllPairsEngine, RoundObserver};
use common::{
    error::Error,
    types::{Distance, INF},
};

/// All-pairs Floyd-Warshall over a dense matrix.
///
/// For every pivot `k` the row `k` is copied before the pass, and every row
/// `i` is relaxed against that copy: `dist[i][j] = min(dist[i][j], dist[i][k] + pivot[j])`.
/// The parallel variant hands whole rows to workers (`par_chunks_mut`), so no
/// two workers ever write the same cell, and nobody reads a row another worker
/// is writing.
///
/// Without negative cycles the copy is exactly what an in-place sweep would
/// read, since `dist[k][k] >= 0` means row `k` cannot change during pass `k`.
/// With a negative cycle through `k` it still pins both variants to the same
/// start-of-pass values, so they agree cell for cell on every input.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloydWarshall {
    execution: Execution,
}

impl FloydWarshall {
    pub fn new(execution: Execution) -> Self {
        Self { execution }
    }

    pub fn sequential() -> Self {
        Self::new(Execution::Sequential)
    }

    pub fn execution(&self) -> Execution {
        self.execution
    }
}

impl AllPairsEngine for FloydWarshall {
    fn all_pairs_observed<O: RoundObserver>(
        &self,
        mut matrix: DistanceMatrix,
        observer: &mut O,
    ) -> Result<DistanceMatrix, Error> {
        let n = matrix.num_nodes();
        let pool = self.execution.worker_pool()?;

        info!(nodes = n, mode = %self.execution, "Running Floyd-Warshall");

        let mut pivot_row = vec![INF; n];

        for k in 0..n {
            pivot_row.copy_from_slice(matrix.row(k));
            let pivot_row = pivot_row.as_slice();
            let cells = matrix.cells_mut();

            match &pool {
                None => cells
                    .chunks_mut(n)
                    .for_each(|row| relax_row(row, k, pivot_row)),
                Some(pool) => pool.install(|| {
                    cells
                        .par_chunks_mut(n)
                        .for_each(|row| relax_row(row, k, pivot_row))
                }),
            }

            if observer.wants_snapshots() {
                observer.on_round(k, matrix.as_slice());
            }
            debug!(pivot = k, "Floyd-Warshall pivot complete");
        }

        info!("Floyd-Warshall finished");
        Ok(matrix)
    }
}

/// Relaxes one row `i` through pivot `k`.
fn relax_row(row: &mut [Distance], k: usize, pivot_row: &[Distance]) {
    let through_pivot = row[k];
    if through_pivot == INF {
        return;
    }

    for (cell, &tail) in row.iter_mut().zip(pivot_row) {
        if tail == INF {
            continue;
        }
        let candidate = through_pivot.saturating_add(tail);
        if candidate < *cell {
            *cell = candidate;
        }
    }
}

#[cfg(test)]
mod floyd_warshall_tests {
    use super::*;
    use crate::cycle::{matrix_has_negative_cycle, negative_cycle_vertices};
    use common::types::Edge;

    fn build_matrix(num_nodes: usize, edges: &[Edge]) -> DistanceMatrix {
        DistanceMatrix::from_edges(num_nodes, edges).unwrap()
    }

    fn engines() -> Vec<FloydWarshall> {
        vec![
            FloydWarshall::sequential(),
            FloydWarshall::new(Execution::from_threads(1)),
            FloydWarshall::new(Execution::from_threads(4)),
        ]
    }

    #[test]
    fn small_graph_all_pairs() {
        let matrix = build_matrix(4, &[(0, 1, 1), (1, 2, 2), (0, 2, 5), (2, 3, 1)]);

        for engine in engines() {
            let result = engine.all_pairs(matrix.clone()).unwrap();
            assert_eq!(result.row(0), &[0, 1, 3, 4]);
            assert_eq!(result.row(1), &[INF, 0, 2, 3]);
            assert_eq!(result.row(2), &[INF, INF, 0, 1]);
            assert_eq!(result.row(3), &[INF, INF, INF, 0]);
            assert!(!matrix_has_negative_cycle(&result));
        }
    }

    #[test]
    fn negative_edges_without_cycle() {
        let matrix = build_matrix(3, &[(0, 1, 4), (1, 2, -2), (0, 2, 3), (2, 0, 1)]);

        for engine in engines() {
            let result = engine.all_pairs(matrix.clone()).unwrap();
            assert_eq!(result.row(0), &[0, 4, 2]);
            assert_eq!(result.row(1), &[-1, 0, -2]);
            assert_eq!(result.row(2), &[1, 5, 0]);
            assert!(!matrix_has_negative_cycle(&result));
        }
    }

    #[test]
    fn two_cycle_marks_both_diagonal_entries() {
        let matrix = build_matrix(2, &[(0, 1, -1), (1, 0, -1)]);

        for engine in engines() {
            let result = engine.all_pairs(matrix.clone()).unwrap();
            assert!(result.get(0, 0) < 0);
            assert!(result.get(1, 1) < 0);
            assert_eq!(negative_cycle_vertices(&result), vec![0, 1]);
        }
    }

    #[test]
    fn negative_cycle_results_agree_across_modes() {
        let matrix = build_matrix(
            5,
            &[(0, 1, 2), (1, 2, -4), (2, 1, 1), (2, 3, 2), (3, 4, -1), (4, 0, 3)],
        );

        let expected = FloydWarshall::sequential().all_pairs(matrix.clone()).unwrap();
        assert!(matrix_has_negative_cycle(&expected));

        for threads in [2, 3, 8] {
            let result = FloydWarshall::new(Execution::from_threads(threads))
                .all_pairs(matrix.clone())
                .unwrap();
            assert_eq!(result, expected);
        }
    }

    #[test]
    fn single_node_graph() {
        for engine in engines() {
            let result = engine.all_pairs(DistanceMatrix::new(1).unwrap()).unwrap();
            assert_eq!(result.as_slice(), &[0]);
        }
    }

    #[test]
    fn empty_matrix_is_returned_unchanged() {
        for engine in engines() {
            let result = engine.all_pairs(DistanceMatrix::new(0).unwrap()).unwrap();
            assert_eq!(result.num_nodes(), 0);
        }
    }

    #[test]
    fn relax_row_skips_unreached_pivot() {
        let mut row = [0, INF, 7];
        relax_row(&mut row, 1, &[1, 0, 1]);
        assert_eq!(row, [0, INF, 7]);
    }

    #[test]
    fn relax_row_lowers_cells_through_pivot() {
        let mut row = [0, 2, 9, INF];
        relax_row(&mut row, 1, &[INF, 0, 3, 4]);
        assert_eq!(row, [0, 2, 5, 6]);
    }

    #[test]
    fn large_ring_matches_across_modes() {
        let n = 120;
        let edges: Vec<Edge> = (0..n)
            .map(|i| (i, (i + 1) % n, 1 + (i % 5) as i64))
            .chain((0..n).step_by(7).map(|i| (i, (i + 11) % n, 3)))
            .collect();
        let matrix = build_matrix(n, &edges);

        let expected = FloydWarshall::sequential().all_pairs(matrix.clone()).unwrap();
        for threads in [2, 6] {
            let result = FloydWarshall::new(Execution::from_threads(threads))
                .all_pairs(matrix.clone())
                .unwrap();
            assert_eq!(result, expected);
        }
    }
}
