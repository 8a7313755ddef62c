use std::ops::Range;

use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how the rows of the first axis are spread over worker threads.
///
/// Every strategy partitions statically: the worker count `P` is read once per call and
/// the first axis is cut into `P` contiguous ranges (see [`partition_rows`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool, one partition per pool thread.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small arrays, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Number of partitions the strategy cuts the first axis into.
    ///
    /// # Errors
    ///
    /// Returns `InvalidThreadCount` for `Fixed(0)`.
    pub fn workers(&self) -> Result<usize, ParallelError> {
        match *self {
            ExecutionStrategy::ParallelRows => Ok(rayon::current_num_threads().max(1)),
            ExecutionStrategy::Serial => Ok(1),
            ExecutionStrategy::Fixed(0) => Err(ParallelError::InvalidThreadCount(0)),
            ExecutionStrategy::Fixed(n) => Ok(n),
        }
    }
}

/// Splits `0..extent` into `workers` contiguous ranges.
///
/// Each range holds `extent / workers` rows; the last one also takes the remainder, so
/// the ranges always cover `0..extent` exactly.
///
/// # Example
///
/// ```
/// use ndwarp_resample::parallel::partition_rows;
///
/// assert_eq!(partition_rows(10, 3), vec![0..3, 3..6, 6..10]);
/// ```
pub fn partition_rows(extent: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let len = extent / workers;
    (0..workers)
        .map(|w| {
            let start = len * w;
            let end = if w == workers - 1 { extent } else { start + len };
            start..end
        })
        .collect()
}

/// Runs `f` once per partition of the first axis of a row-major buffer.
///
/// `dst` is cut into disjoint chunks of `row_len` elements per row, so every call of
/// `f` receives the row range it owns together with exactly the elements of those rows.
/// Empty partitions are skipped.
///
/// # Arguments
///
/// * `strategy` - The execution strategy.
/// * `dst` - The destination buffer, `rows * row_len` elements long.
/// * `row_len` - Number of elements in one row of the first axis.
/// * `f` - The work to run on each (row range, chunk) pair.
pub fn par_iter_partitions<T, F>(
    strategy: ExecutionStrategy,
    dst: &mut [T],
    row_len: usize,
    f: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(Range<usize>, &mut [T]) + Send + Sync,
{
    let rows = if row_len == 0 { 0 } else { dst.len() / row_len };
    let workers = strategy.workers()?;
    log::debug!("splitting {rows} rows over {workers} workers ({strategy:?})");
    if rows > 0 && rows < workers {
        log::warn!("only {rows} rows for {workers} workers, the last worker takes all of them");
    }

    let mut chunks = Vec::with_capacity(workers);
    let mut rest = dst;
    for range in partition_rows(rows, workers) {
        let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * row_len);
        rest = tail;
        if !range.is_empty() {
            chunks.push((range, chunk));
        }
    }

    match strategy {
        ExecutionStrategy::Serial => {
            chunks
                .into_iter()
                .for_each(|(range, chunk)| f(range, chunk));
        }
        ExecutionStrategy::ParallelRows => {
            chunks
                .into_par_iter()
                .for_each(|(range, chunk)| f(range, chunk));
        }
        ExecutionStrategy::Fixed(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                chunks
                    .into_par_iter()
                    .for_each(|(range, chunk)| f(range, chunk));
            });
        }
    }
    Ok(())
}
