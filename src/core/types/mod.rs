//! Core type definition module
//!
//! Frames, few-shot exemplars and the chat completion wire types.

pub mod content;
pub mod frame;
pub mod message;
pub mod requests;
pub mod responses;

// Re-export all public types
pub use content::*;
pub use frame::*;
pub use message::*;
pub use requests::*;
pub use responses::*;
