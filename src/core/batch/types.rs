//! Batch types

use crate::core::types::Frame;

/// Contiguous, possibly overlapping slice of the input tagged with its
/// sequence index among all batches of one job
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<T = Frame> {
    /// Position among all batches, 0-based in emission order
    pub index: usize,
    /// Items in input order
    pub items: Vec<T>,
}

impl<T> Batch<T> {
    /// Number of items in the batch
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the batch has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Output of one completed batch request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    /// Index of the batch that produced the output
    pub index: usize,
    /// Text returned by the completion endpoint
    pub output: String,
}
