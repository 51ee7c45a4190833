//! Completion providers
//!
//! The [`CompletionEndpoint`] trait every dispatch goes through, and the
//! HTTP implementation used in production.

pub mod credentials;
pub mod endpoint;
pub mod error;
pub mod http_client;

pub use credentials::Credentials;
#[cfg(test)]
pub use endpoint::MockCompletionEndpoint;
pub use endpoint::CompletionEndpoint;
pub use error::{extract_error_message, first_choice_text, status_error};
pub use http_client::{DEFAULT_REQUEST_TIMEOUT, HttpCompletionClient};
