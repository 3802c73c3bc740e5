//! Concurrent fan-out with first-error reporting
//!
//! A [`TaskGroup`] drives every pushed future to completion concurrently and then
//! reports either all results or the first error that occurred. Failing tasks do
//! not cancel their siblings; later errors are dropped.

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use tracing::debug;

/// A group of independent fallible futures joined with a single barrier
pub struct TaskGroup<'a, T, E> {
    tasks: FuturesUnordered<BoxFuture<'a, Result<T, E>>>,
}

impl<T, E> Default for TaskGroup<'_, T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, E> TaskGroup<'a, T, E> {
    pub fn new() -> Self {
        Self {
            tasks: FuturesUnordered::new(),
        }
    }

    /// Add a task to the group. It starts making progress once [`wait`](Self::wait) polls.
    pub fn push<F>(&mut self, task: F)
    where
        F: Future<Output = Result<T, E>> + Send + 'a,
    {
        self.tasks.push(task.boxed());
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Wait for every task. Results come back in completion order.
    pub async fn wait(mut self) -> Result<Vec<T>, E> {
        let mut results = Vec::with_capacity(self.tasks.len());
        let mut first_error = None;
        let mut discarded = 0usize;

        while let Some(result) = self.tasks.next().await {
            match result {
                Ok(value) => results.push(value),
                Err(err) if first_error.is_none() => first_error = Some(err),
                Err(_) => discarded += 1,
            }
        }

        if discarded > 0 {
            debug!("Discarded {} additional task error(s)", discarded);
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(results),
        }
    }
}
