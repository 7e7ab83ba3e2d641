use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::error::Error;

/// Bounded worker pool used by parallel Karatsuba multiplication.
///
/// The kernel only needs one capability from it: hand over three closures and
/// block until all of them are done ([`WorkerPool::join3`]).
pub struct WorkerPool {
    pool: Option<ThreadPool>,
}

impl WorkerPool {
    /// Builds a dedicated pool with `threads` workers.
    pub fn new(threads: usize) -> Result<Self, Error> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("mutbig-mul-{i}"))
            .build()?;
        debug!(threads = pool.current_num_threads(), "built multiplication worker pool");
        Ok(Self { pool: Some(pool) })
    }

    /// Runs on rayon's global pool.
    pub fn global() -> Self {
        Self { pool: None }
    }

    pub fn num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Runs `a`, `b` and `c` concurrently and waits for all three.
    ///
    /// A panic in any closure is re-raised on the calling thread once the
    /// others have finished.
    pub fn join3<A, B, C, RA, RB, RC>(&self, a: A, b: B, c: C) -> (RA, RB, RC)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        C: FnOnce() -> RC + Send,
        RA: Send,
        RB: Send,
        RC: Send,
    {
        let run = move || {
            let (ra, (rb, rc)) = rayon::join(a, || rayon::join(b, c));
            (ra, rb, rc)
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::global()
    }
}
