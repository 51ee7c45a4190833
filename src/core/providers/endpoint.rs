//! Completion endpoint interface
//!
//! The seam between the orchestration engine and the transport that talks
//! to the language-model provider.

use super::credentials::Credentials;
use crate::core::types::ChatRequest;
use crate::utils::error::UpstreamError;
use async_trait::async_trait;

/// Sends one chat completion request and returns the text of the first choice.
///
/// Implementations hold no per-job state. Credentials arrive with every call
/// so one endpoint can serve concurrent jobs for different callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionEndpoint: Send + Sync {
    /// Exactly one request, no retry
    async fn complete(
        &self,
        request: &ChatRequest,
        credentials: &Credentials,
    ) -> Result<String, UpstreamError>;
}
