use std::fmt;

use common::types::{Distance, is_reached};
use sssp_core::DistanceMatrix;

/// Reachability and spread of a single-source distance vector.
///
/// `max_distance` is the largest finite distance, floored at `0` so that an
/// all-negative result still reports `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReachSummary {
    pub reached: usize,
    pub total: usize,
    pub max_distance: Distance,
}

impl ReachSummary {
    pub fn from_distances(dist: &[Distance]) -> Self {
        let (reached, max_distance) = reach_stats(dist.iter().copied());
        Self {
            reached,
            total: dist.len(),
            max_distance,
        }
    }
}

impl fmt::Display for ReachSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "  Reached {} / {} nodes.", self.reached, self.total)?;
        writeln!(f, "  Max finite distance from source = {}", self.max_distance)
    }
}

/// Reachability over all ordered pairs of a distance matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairSummary {
    pub reachable_pairs: u64,
    pub total_pairs: u64,
    pub max_distance: Distance,
}

impl PairSummary {
    pub fn from_matrix(matrix: &DistanceMatrix) -> Self {
        let (reachable, max_distance) = reach_stats(matrix.as_slice().iter().copied());
        let n = matrix.num_nodes() as u64;
        Self {
            reachable_pairs: reachable as u64,
            total_pairs: n * n,
            max_distance,
        }
    }
}

impl fmt::Display for PairSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "  Reachable pairs: {} / {}",
            self.reachable_pairs, self.total_pairs
        )?;
        writeln!(f, "  Max finite distance: {}", self.max_distance)
    }
}

fn reach_stats(values: impl Iterator<Item = Distance>) -> (usize, Distance) {
    values
        .filter(|&d| is_reached(d))
        .fold((0, 0), |(count, max), d| (count + 1, max.max(d)))
}
