//! Collaborators around the engine
//!
//! The engine treats thumbnails as opaque references. Uploading local
//! captures so the model can fetch them happens here, before a job runs.

pub mod upload;

pub use upload::{HttpThumbnailUploader, ThumbnailUploader, decode_data_uri};
