//! Rayon execution settings for the sweep.

/// Minimum rows handed to one rayon task.
///
/// Each row resolves a full observation schedule, so small chunks already
/// amortise task overhead.
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Default row count at which the sweep switches to rayon.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 512;

/// Configuration for parallel execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Minimum rows per rayon task
    pub batch_size: usize,
    /// Minimum rows before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Always run sequentially.
    pub fn sequential() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, usize::MAX)
    }

    /// Returns whether to use parallel processing for the given row count.
    #[inline]
    pub fn should_parallelize(&self, n_rows: usize) -> bool {
        n_rows >= self.parallel_threshold
    }
}
