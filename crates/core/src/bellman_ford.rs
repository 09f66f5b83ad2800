use std::sync::atomic::{AtomicI64, Ordering};

use parking_lot::{Mutex, MutexGuard};
use rayon::prelude::*;
use tracing::{debug, info};

use super::edge_list::EdgeList;
use super::execution::{Execution, WorkerPool};
use super::traits::{RoundObserver, SingleSourceEngine, initial_distances};
use common::{
    error::Error,
    types::{Distance, DistanceVector, Edge, path_candidate},
};

/// Edges handed to a worker at a time in the parallel round.
pub const DEFAULT_EDGE_CHUNK_SIZE: usize = 256;

/// Bellman-Ford over an edge list.
///
/// Runs at most `n - 1` rounds, each relaxing every edge once, and stops
/// early after the first round that changes nothing. When a negative cycle is
/// reachable from the source the returned vector is simply the state after
/// the last round; use [`crate::cycle::has_negative_cycle`] to detect that case.
#[derive(Debug, Clone, Copy)]
pub struct BellmanFord {
    execution: Execution,
    chunk_size: usize,
}

impl BellmanFord {
    pub fn new(execution: Execution) -> Self {
        Self {
            execution,
            chunk_size: DEFAULT_EDGE_CHUNK_SIZE,
        }
    }

    pub fn sequential() -> Self {
        Self::new(Execution::Sequential)
    }

    /// Sets how many edges a worker claims at once. `0` is treated as `1`.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn execution(&self) -> Execution {
        self.execution
    }

    fn run_sequential<O: RoundObserver>(
        &self,
        graph: &EdgeList,
        mut dist: DistanceVector,
        observer: &mut O,
    ) -> (DistanceVector, usize) {
        let rounds = graph.num_nodes().saturating_sub(1);
        let mut executed = 0;

        for round in 0..rounds {
            let mut changed = false;

            for &(u, v, w) in graph.edges() {
                let Some(candidate) = path_candidate(dist[u], w) else {
                    continue;
                };
                if candidate < dist[v] {
                    dist[v] = candidate;
                    changed = true;
                }
            }

            executed += 1;
            if observer.wants_snapshots() {
                observer.on_round(round, &dist);
            }
            debug!(round, changed, "Bellman-Ford round complete");

            // no change means we are at the fixpoint
            if !changed {
                break;
            }
        }

        (dist, executed)
    }

    fn run_parallel<O: RoundObserver>(
        &self,
        graph: &EdgeList,
        dist: DistanceVector,
        pool: &WorkerPool,
        observer: &mut O,
    ) -> (DistanceVector, usize) {
        let rounds = graph.num_nodes().saturating_sub(1);
        let shared = SharedDistances::new(dist);
        let edges = graph.edges();
        let chunk_size = self.chunk_size;
        let mut executed = 0;

        for round in 0..rounds {
            // Each chunk folds its own "changed" flag; the OR-reduce combines them
            // once every chunk has finished, which is the barrier between rounds.
            let changed = pool.install(|| {
                edges
                    .par_chunks(chunk_size)
                    .map(|chunk| {
                        chunk
                            .iter()
                            .fold(false, |changed, &edge| shared.relax(edge) || changed)
                    })
                    .reduce(|| false, |a, b| a || b)
            });

            executed += 1;
            if observer.wants_snapshots() {
                observer.on_round(round, &shared.snapshot());
            }
            debug!(round, changed, "Bellman-Ford round complete");

            if !changed {
                break;
            }
        }

        (shared.into_distances(), executed)
    }
}

impl SingleSourceEngine for BellmanFord {
    type Graph = EdgeList;

    fn shortest_paths_observed<O: RoundObserver>(
        &self,
        graph: &EdgeList,
        source: usize,
        observer: &mut O,
    ) -> Result<DistanceVector, Error> {
        let dist = initial_distances(graph.num_nodes(), source)?;
        let pool = self.execution.worker_pool()?;

        info!(
            nodes = graph.num_nodes(),
            edges = graph.num_edges(),
            source,
            mode = %self.execution,
            "Running Bellman-Ford"
        );

        let (dist, rounds) = match &pool {
            None => self.run_sequential(graph, dist, observer),
            Some(pool) => self.run_parallel(graph, dist, pool, observer),
        };

        info!(rounds, "Bellman-Ford finished");
        Ok(dist)
    }
}

/// One lock per vertex, guarding writes to that vertex's distance slot.
///
/// Lives only for one engine invocation. Guards release on drop, so a panic in
/// the middle of a relaxation cannot leave a vertex locked.
struct VertexLocks {
    locks: Vec<Mutex<()>>,
}

impl VertexLocks {
    fn new(num_nodes: usize) -> Self {
        Self {
            locks: (0..num_nodes).map(|_| Mutex::new(())).collect(),
        }
    }

    fn lock(&self, v: usize) -> MutexGuard<'_, ()> {
        self.locks[v].lock()
    }
}

/// Distance vector shared by all workers of a parallel round.
///
/// Reads are lock-free relaxed loads: values only ever decrease, so a stale
/// read yields a candidate that is merely not yet the best, never a wrong one.
/// Writes happen only under the target vertex's lock.
struct SharedDistances {
    slots: Vec<AtomicI64>,
    locks: VertexLocks,
}

impl SharedDistances {
    fn new(dist: DistanceVector) -> Self {
        let locks = VertexLocks::new(dist.len());
        Self {
            slots: dist.into_iter().map(AtomicI64::new).collect(),
            locks,
        }
    }

    #[inline]
    fn load(&self, v: usize) -> Distance {
        self.slots[v].load(Ordering::Relaxed)
    }

    /// Relaxes one edge. Returns true if `dist[v]` was lowered.
    fn relax(&self, (u, v, w): Edge) -> bool {
        let Some(candidate) = path_candidate(self.load(u), w) else {
            return false;
        };

        // Optimistic check without the lock; most edges stop here.
        if candidate >= self.load(v) {
            return false;
        }

        let _guard = self.locks.lock(v);
        // Another worker may have written a smaller value since the check above.
        if candidate < self.load(v) {
            self.slots[v].store(candidate, Ordering::Relaxed);
            true
        } else {
            false
        }
    }

    fn snapshot(&self) -> DistanceVector {
        (0..self.slots.len()).map(|v| self.load(v)).collect()
    }

    fn into_distances(self) -> DistanceVector {
        self.slots.into_iter().map(AtomicI64::into_inner).collect()
    }
}
