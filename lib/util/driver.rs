use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};
use std::num::NonZeroUsize;

/// A bounded parallel map.
#[derive(Debug)]
pub enum Driver {
    Parallel(ThreadPool),
    Sequential,
}

impl Driver {
    /// Constructs a [`Driver`] bounded by the given number of threads.
    pub fn new(threads: NonZeroUsize) -> Self {
        match threads.get() {
            1 => Driver::Sequential,
            n => Driver::Parallel(ThreadPoolBuilder::new().num_threads(n).build().unwrap()),
        }
    }

    /// Maps `f` over every item, possibly across multiple threads in parallel.
    ///
    /// The output preserves input order regardless of completion order; a
    /// raised error aborts the map and is propagated.
    pub fn map<T, R, E, F>(&self, items: &mut [T], f: F) -> Result<Vec<R>, E>
    where
        T: Send,
        R: Send,
        E: Send,
        F: Fn(&mut T) -> Result<R, E> + Sync,
    {
        match self {
            Driver::Sequential => items.iter_mut().map(f).collect(),
            Driver::Parallel(pool) => {
                pool.install(|| items.par_iter_mut().map(|i| f(i)).collect())
            }
        }
    }
}
