use super::buffer::try_filled;
use super::matrix::DistanceMatrix;
use common::{
    error::Error,
    types::{Distance, DistanceVector},
};

/// Receives the distance state after every outer-loop iteration
/// (a Bellman-Ford round, a Dijkstra selection, a Floyd-Warshall pivot).
///
/// Snapshots are taken after the iteration's parallel region has joined, so an
/// observer never sees a half-applied round.
pub trait RoundObserver {
    fn on_round(&mut self, round: usize, distances: &[Distance]);

    /// Engines skip building snapshots when this returns false.
    fn wants_snapshots(&self) -> bool {
        true
    }
}

/// The no-op observer used by the plain entry points.
impl RoundObserver for () {
    fn on_round(&mut self, _round: usize, _distances: &[Distance]) {}

    fn wants_snapshots(&self) -> bool {
        false
    }
}

/// Trait for engines that compute distances from one source vertex.
pub trait SingleSourceEngine {
    /// Graph representation the engine relaxes over.
    type Graph;

    /// Computes the distance vector from `source`.
    ///
    /// Returns `Err(Error::EmptyGraph)` for a graph without vertices and
    /// `Err(Error::NodeIndexOutOfBounds)` if `source` is not a vertex.
    fn shortest_paths(&self, graph: &Self::Graph, source: usize) -> Result<DistanceVector, Error> {
        self.shortest_paths_observed(graph, source, &mut ())
    }

    /// Same as [`SingleSourceEngine::shortest_paths`], reporting every round to `observer`.
    fn shortest_paths_observed<O: RoundObserver>(
        &self,
        graph: &Self::Graph,
        source: usize,
        observer: &mut O,
    ) -> Result<DistanceVector, Error>;
}

/// Trait for engines that relax a full distance matrix in place.
pub trait AllPairsEngine {
    fn all_pairs(&self, matrix: DistanceMatrix) -> Result<DistanceMatrix, Error> {
        self.all_pairs_observed(matrix, &mut ())
    }

    fn all_pairs_observed<O: RoundObserver>(
        &self,
        matrix: DistanceMatrix,
        observer: &mut O,
    ) -> Result<DistanceMatrix, Error>;
}

/// Fresh distance vector for a single-source run: `INF` everywhere, `0` at `source`.
pub(crate) fn initial_distances(num_nodes: usize, source: usize) -> Result<DistanceVector, Error> {
    if num_nodes == 0 {
        return Err(Error::EmptyGraph);
    }
    if source >= num_nodes {
        return Err(Error::NodeIndexOutOfBounds(source));
    }

    let mut dist = try_filled(Some(num_nodes), common::INF, num_nodes)?;
    dist[source] = 0;
    Ok(dist)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_distances_seed_source() {
        assert_eq!(initial_distances(3, 1).unwrap(), vec![common::INF, 0, common::INF]);
    }

    #[test]
    fn initial_distances_reject_bad_input() {
        assert_eq!(initial_distances(0, 0), Err(Error::EmptyGraph));
        assert_eq!(initial_distances(2, 2), Err(Error::NodeIndexOutOfBounds(2)));
        assert_eq!(
            initial_distances(usize::MAX, 0),
            Err(Error::GraphTooLarge { nodes: usize::MAX })
        );
    }

    #[test]
    fn unit_observer_declines_snapshots() {
        assert!(!().wants_snapshots());
    }
}
