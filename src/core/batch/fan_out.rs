//! Fan-out execution - concurrent dispatch, ordered collection
//!
//! Every item is dispatched without waiting on its siblings. Results are
//! tagged with the index of the item that produced them and sorted back
//! into input order once all of them have completed, so completion order
//! never leaks into the output.

use crate::utils::error::{BatchFailure, FrameDocError, Result, UpstreamError};
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Configuration for fan-out execution
#[derive(Debug, Clone, Default)]
pub struct FanOutConfig {
    /// Maximum requests in flight, `None` dispatches every item at once.
    ///
    /// With a cap, items past the limit are only dispatched once an earlier
    /// one completes, so not every request is issued before the first is
    /// awaited. Output order is unaffected.
    pub concurrency: Option<usize>,
}

impl FanOutConfig {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of requests in flight
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency.max(1));
        self
    }
}

/// Result of an individual item
#[derive(Debug, Clone)]
pub struct FanOutItemResult<R> {
    /// Index of the item in the original input
    pub index: usize,
    /// The result (Ok or Err)
    pub result: std::result::Result<R, UpstreamError>,
    /// Time taken for this item
    pub duration: Duration,
}

/// Concurrent executor that restores input order
#[derive(Debug, Clone, Default)]
pub struct FanOutExecutor {
    config: FanOutConfig,
}

impl FanOutExecutor {
    /// Create a new executor
    pub fn new(config: FanOutConfig) -> Self {
        Self { config }
    }

    /// Run `operation` for every item concurrently.
    ///
    /// Returns one result per item, sorted by index. The operation receives
    /// the index so it can tag its own logs.
    pub async fn execute<T, R, F, Fut>(
        &self,
        items: impl IntoIterator<Item = T>,
        operation: F,
    ) -> Vec<FanOutItemResult<R>>
    where
        F: Fn(usize, T) -> Fut,
        Fut: Future<Output = std::result::Result<R, UpstreamError>>,
    {
        let items_with_index: Vec<(usize, T)> = items.into_iter().enumerate().collect();
        let total = items_with_index.len();
        let concurrency = self.config.concurrency.unwrap_or(total).max(1);

        let mut results: Vec<FanOutItemResult<R>> = stream::iter(items_with_index)
            .map(|(index, item)| {
                let pending = operation(index, item);
                async move {
                    let start = Instant::now();
                    debug!(index, total, "Dispatching item");
                    let result = pending.await;
                    let duration = start.elapsed();

                    match &result {
                        Ok(_) => info!(
                            index,
                            total,
                            elapsed_ms = duration.as_millis() as u64,
                            "Item completed"
                        ),
                        Err(e) => warn!(
                            index,
                            total,
                            elapsed_ms = duration.as_millis() as u64,
                            error = %e,
                            "Item failed"
                        ),
                    }

                    FanOutItemResult {
                        index,
                        result,
                        duration,
                    }
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        // Completion order is arbitrary
        results.sort_by_key(|r| r.index);
        results
    }

    /// Run every item and return the outputs in input order, or a
    /// `PartialFailure` naming every failed index when any item failed.
    /// Successful outputs are discarded on failure.
    pub async fn execute_all<T, R, F, Fut>(
        &self,
        items: impl IntoIterator<Item = T>,
        operation: F,
    ) -> Result<Vec<R>>
    where
        F: Fn(usize, T) -> Fut,
        Fut: Future<Output = std::result::Result<R, UpstreamError>>,
    {
        let results = self.execute(items, operation).await;
        collect_ordered(results)
    }
}

/// Fold per-item results into all-or-nothing output. Expects `results`
/// sorted by index.
pub fn collect_ordered<R>(results: Vec<FanOutItemResult<R>>) -> Result<Vec<R>> {
    let total = results.len();
    let mut outputs = Vec::with_capacity(total);
    let mut failures = Vec::new();

    for item in results {
        match item.result {
            Ok(value) => outputs.push(value),
            Err(error) => failures.push(BatchFailure {
                index: item.index,
                error,
            }),
        }
    }

    if failures.is_empty() {
        Ok(outputs)
    } else {
        Err(FrameDocError::PartialFailure { total, failures })
    }
}
