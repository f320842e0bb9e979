//! # Executors
//!
//! A predictor invocation fans out exactly four independent jobs, one per
//! direction, and waits for all of them before comparing results. An
//! `Executor` is the capability to run those four closures and block until
//! every one has finished.
//!
//! `PoolExecutor` spreads the jobs over a rayon thread pool and is only
//! compiled with the `parallel` feature. `SequentialExecutor` runs them one
//! after another on the calling thread with identical semantics.

use crate::direction::Direction;
#[cfg(feature = "parallel")]
use crate::error::ExecutorError;
#[cfg(feature = "parallel")]
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Runs one job per direction behind a join barrier
pub trait Executor: Send + Sync {
    /// Runs `job` once for each direction in `Direction::ALL` and returns the
    /// results in that order. Returns only after all four jobs completed.
    fn run_directions<T, F>(&self, job: F) -> [T; 4]
    where
        F: Fn(Direction) -> T + Sync + Send,
        T: Send;

    /// Short label for logs and benchmark output
    fn name(&self) -> &'static str;
}

/// Runs the four jobs in order on the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn run_directions<T, F>(&self, job: F) -> [T; 4]
    where
        F: Fn(Direction) -> T + Sync + Send,
        T: Send,
    {
        Direction::ALL.map(job)
    }

    fn name(&self) -> &'static str {
        "sequential"
    }
}

/// Runs the four jobs on a dedicated rayon thread pool
#[cfg(feature = "parallel")]
pub struct PoolExecutor {
    /// The rayon thread pool the direction jobs run on.
    pool: ThreadPool,
}

#[cfg(feature = "parallel")]
impl PoolExecutor {
    /// Creates a pool-backed executor.
    ///
    /// # Arguments
    /// * `num_threads` - Worker threads for the pool. If 0, one thread per
    ///   direction is used, capped by the number of CPUs.
    pub fn new(num_threads: usize) -> Result<Self, ExecutorError> {
        let threads = if num_threads > 0 {
            num_threads
        } else {
            num_cpus::get().clamp(1, Direction::ALL.len())
        };
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("rollout-{}", i))
            .build()
            .map_err(|e| ExecutorError::PoolBuild(e.to_string()))?;
        log::debug!("rollout pool ready with {} threads", threads);
        Ok(Self { pool })
    }

    /// Number of worker threads in the pool
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

#[cfg(feature = "parallel")]
impl Executor for PoolExecutor {
    fn run_directions<T, F>(&self, job: F) -> [T; 4]
    where
        F: Fn(Direction) -> T + Sync + Send,
        T: Send,
    {
        let job = &job;
        let ((up, down), (left, right)) = self.pool.install(|| {
            rayon::join(
                || rayon::join(|| job(Direction::Up), || job(Direction::Down)),
                || rayon::join(|| job(Direction::Left), || job(Direction::Right)),
            )
        });
        [up, down, left, right]
    }

    fn name(&self) -> &'static str {
        "pool"
    }
}

/// Executor used when the caller does not pick one
#[cfg(feature = "parallel")]
pub type DefaultExecutor = PoolExecutor;

/// Executor used when the caller does not pick one
#[cfg(not(feature = "parallel"))]
pub type DefaultExecutor = SequentialExecutor;

/// Builds the default executor with the given thread count
///
/// Without the `parallel` feature the thread count is ignored.
#[cfg(feature = "parallel")]
pub fn default_executor(num_threads: usize) -> Result<DefaultExecutor, ExecutorError> {
    PoolExecutor::new(num_threads)
}

/// Builds the default executor with the given thread count
///
/// Without the `parallel` feature the thread count is ignored.
#[cfg(not(feature = "parallel"))]
pub fn default_executor(_num_threads: usize) -> Result<DefaultExecutor, crate::error::ExecutorError> {
    Ok(SequentialExecutor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_results_in_scan_order() {
        let results = SequentialExecutor.run_directions(|d| d.index() * 10);
        assert_eq!(results, [0, 10, 20, 30]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_pool_results_in_scan_order() {
        let executor = PoolExecutor::new(4).unwrap();
        assert_eq!(executor.num_threads(), 4);
        let results = executor.run_directions(|d| d);
        assert_eq!(results, Direction::ALL);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_pool_waits_for_every_job() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::time::Duration;

        let finished = AtomicUsize::new(0);
        let executor = PoolExecutor::new(2).unwrap();
        executor.run_directions(|d| {
            std::thread::sleep(Duration::from_millis(5 * (d.index() as u64 + 1)));
            finished.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(finished.load(Ordering::SeqCst), 4);
    }
}
