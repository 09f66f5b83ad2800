use std::fmt;
use std::num::NonZeroUsize;

use common::error::Error;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// How an engine runs: on the calling thread, or on a dedicated worker pool.
///
/// The pool size travels with each engine call; nothing here touches global
/// rayon state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    #[default]
    Sequential,
    Parallel { threads: NonZeroUsize },
}

impl Execution {
    /// `0` selects the sequential engine, any positive count a pool of that size.
    pub fn from_threads(threads: usize) -> Self {
        NonZeroUsize::new(threads).map_or(Execution::Sequential, |threads| {
            Execution::Parallel { threads }
        })
    }

    /// Worker count, `0` for sequential.
    pub fn threads(&self) -> usize {
        match self {
            Execution::Sequential => 0,
            Execution::Parallel { threads } => threads.get(),
        }
    }

    pub fn is_parallel(&self) -> bool {
        matches!(self, Execution::Parallel { .. })
    }

    /// Builds the pool for one engine invocation, or `None` when sequential.
    pub(crate) fn worker_pool(&self) -> Result<Option<WorkerPool>, Error> {
        match *self {
            Execution::Sequential => Ok(None),
            Execution::Parallel { threads } => WorkerPool::new(threads).map(Some),
        }
    }
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Execution::Sequential => write!(f, "sequential"),
            Execution::Parallel { threads } => write!(f, "parallel with {} threads", threads),
        }
    }
}

/// Fixed-size pool scoped to a single engine invocation.
pub(crate) struct WorkerPool {
    pool: ThreadPool,
    workers: usize,
}

impl WorkerPool {
    fn new(threads: NonZeroUsize) -> Result<Self, Error> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads.get())
            .thread_name(|i| format!("sssp-worker-{i}"))
            .build()
            .map_err(|e| Error::ThreadPool(e.to_string()))?;

        Ok(Self {
            pool,
            workers: threads.get(),
        })
    }

    pub(crate) fn workers(&self) -> usize {
        self.workers
    }

    /// Runs `op` inside the pool. Returns once every task it spawned has joined.
    pub(crate) fn install<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_threads_is_sequential() {
        assert_eq!(Execution::from_threads(0), Execution::Sequential);
        assert_eq!(Execution::from_threads(0).threads(), 0);
        assert!(!Execution::from_threads(0).is_parallel());
    }

    #[test]
    fn positive_threads_is_parallel() {
        let execution = Execution::from_threads(4);

        assert!(execution.is_parallel());
        assert_eq!(execution.threads(), 4);
        assert_eq!(execution.to_string(), "parallel with 4 threads");
    }

    #[test]
    fn pool_has_requested_size() {
        let pool = Execution::from_threads(3).worker_pool().unwrap().unwrap();

        assert_eq!(pool.workers(), 3);
        assert_eq!(pool.install(rayon::current_num_threads), 3);
    }

    #[test]
    fn sequential_builds_no_pool() {
        assert!(Execution::Sequential.worker_pool().unwrap().is_none());
    }
}
