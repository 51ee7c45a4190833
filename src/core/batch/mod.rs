//! Batch processing for frame sequences
//!
//! Splitting frames into model-sized batches and dispatching the batches
//! concurrently with order-restoring collection.

mod fan_out;
mod splitter;
mod types;


// Re-export all public types
pub use fan_out::{FanOutConfig, FanOutExecutor, FanOutItemResult, collect_ordered};
pub use splitter::BatchSplitter;
pub use types::{Batch, BatchResult};
