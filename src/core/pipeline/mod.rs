//! Job orchestration
//!
//! [`JobRunner`] drives a [`Job`] through batching, concurrent dispatch and
//! consolidation, and runs per-frame auto-annotation.

mod annotate;
mod consolidator;
mod job;
mod runner;


pub use annotate::FrameAnnotation;
pub use consolidator::consolidate;
pub use job::{Job, JobDefinition, JobOutput};
pub use runner::JobRunner;
