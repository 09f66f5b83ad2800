//! Post-hoc negative-cycle checks on finished engine output.

use super::matrix::DistanceMatrix;
use common::types::{Distance, Edge, Weight, path_candidate};

/// Returns the first edge that can still be relaxed against `dist`.
///
/// After Bellman-Ford has run its `n - 1` rounds, any such edge proves a
/// negative cycle reachable from the source. Edges whose endpoints fall
/// outside `dist` are ignored.
///
/// A negative edge whose sum is pinned at `Distance::MIN` also counts: with
/// weights in [`FileWeight`] range no simple path gets near that floor, so
/// saturation only happens while walking a negative cycle.
///
/// [`FileWeight`]: common::types::FileWeight
pub fn find_violated_edge(edges: &[Edge], dist: &[Distance]) -> Option<Edge> {
    edges.iter().copied().find(|&(u, v, w)| {
        match (dist.get(u), dist.get(v)) {
            (Some(&du), Some(&dv)) => still_relaxes(du, dv, w),
            _ => false,
        }
    })
}

fn still_relaxes(du: Distance, dv: Distance, w: Weight) -> bool {
    match path_candidate(du, w) {
        Some(candidate) => candidate < dv || (candidate == Distance::MIN && w < 0),
        None => false,
    }
}

/// Bellman-Ford check: true if some edge `(u, v, w)` with `dist[u] != INF`
/// still satisfies `dist[u] + w < dist[v]`.
pub fn has_negative_cycle(edges: &[Edge], dist: &[Distance]) -> bool {
    find_violated_edge(edges, dist).is_some()
}

/// Floyd-Warshall check: true if any `dist[i][i] < 0`.
pub fn matrix_has_negative_cycle(matrix: &DistanceMatrix) -> bool {
    matrix.diagonal().any(|d| d < 0)
}

/// Every vertex that lies on (or can reach and return through) a negative cycle.
pub fn negative_cycle_vertices(matrix: &DistanceMatrix) -> Vec<usize> {
    matrix
        .diagonal()
        .enumerate()
        .filter(|&(_, d)| d < 0)
        .map(|(i, _)| i)
        .collect()
}
