use log::debug;
use rayon::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParallelError {
    #[error("Thread error: {0}")]
    ThreadError(String),

    #[error("Invalid chunk size: {0}")]
    InvalidChunkSize(usize),
}

/// Configuration for parallel processing
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of threads to use
    pub threads: usize,

    /// Size of chunks handed to each worker
    pub chunk_size: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        ParallelConfig {
            threads: rayon::current_num_threads(),
            chunk_size: 1000,
        }
    }
}

/// Maps `processor` over `items` on a dedicated rayon pool.
///
/// Output order always matches input order, whatever order the workers
/// finish in. The first error (by input position) is returned.
pub fn parallel_process<T, U, F, E>(
    items: &[T],
    processor: F,
    config: &ParallelConfig,
) -> Result<Vec<U>, E>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> Result<U, E> + Send + Sync,
    E: From<ParallelError> + Send,
{
    if config.chunk_size == 0 {
        return Err(ParallelError::InvalidChunkSize(0).into());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .map_err(|e| ParallelError::ThreadError(format!("Failed to build thread pool: {}", e)))?;

    debug!(
        "Processing {} items on {} threads (chunk size {})",
        items.len(),
        config.threads,
        config.chunk_size
    );

    pool.install(|| {
        let results: Vec<Result<U, E>> = items
            .par_chunks(config.chunk_size)
            .flat_map_iter(|chunk| chunk.iter().map(&processor))
            .collect();

        results.into_iter().collect()
    })
}
