//! Fixed-size, optionally overlapping batch splitting

use super::types::Batch;
use crate::utils::error::{FrameDocError, Result};

/// Splits an ordered sequence into model-sized batches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSplitter {
    max_batch_size: usize,
    overlap: usize,
}

impl BatchSplitter {
    /// Create a splitter. `overlap` must be smaller than `max_batch_size`.
    pub fn new(max_batch_size: usize, overlap: usize) -> Result<Self> {
        if max_batch_size == 0 {
            return Err(FrameDocError::InvalidConfiguration(
                "max_batch_size must be at least 1".to_string(),
            ));
        }
        if overlap >= max_batch_size {
            return Err(FrameDocError::InvalidConfiguration(format!(
                "overlap ({}) must be smaller than max_batch_size ({})",
                overlap, max_batch_size
            )));
        }

        Ok(Self {
            max_batch_size,
            overlap,
        })
    }

    /// Maximum items per batch
    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    /// Items shared between consecutive batches
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Offset advance between consecutive batches
    pub fn stride(&self) -> usize {
        self.max_batch_size - self.overlap
    }

    /// Number of batches `split` yields for `len` items
    pub fn batch_count(&self, len: usize) -> usize {
        len.div_ceil(self.stride())
    }

    /// Split `items` into batches indexed 0..N-1. The last batch may be short.
    pub fn split<T: Clone>(&self, items: &[T]) -> Vec<Batch<T>> {
        (0..items.len())
            .step_by(self.stride())
            .enumerate()
            .map(|(index, offset)| {
                let end = offset.saturating_add(self.max_batch_size).min(items.len());
                Batch {
                    index,
                    items: items[offset..end].to_vec(),
                }
            })
            .collect()
    }
}

impl Default for BatchSplitter {
    fn default() -> Self {
        Self {
            max_batch_size: crate::config::DEFAULT_MAX_BATCH_SIZE,
            overlap: 0,
        }
    }
}
