//! Consolidation of ordered partial outputs

use crate::core::prompt::build_consolidation_messages;
use crate::core::providers::{CompletionEndpoint, Credentials};
use crate::core::types::RequestSettings;
use crate::utils::error::Result;
use std::time::Instant;
use tracing::{debug, info};

/// Merge ordered partial outputs into one document with a single request.
///
/// Any failure fails the whole job.
pub async fn consolidate(
    endpoint: &dyn CompletionEndpoint,
    outputs: &[String],
    prompt: &str,
    settings: &RequestSettings,
    credentials: &Credentials,
) -> Result<String> {
    let request = settings.request(build_consolidation_messages(prompt, outputs));
    debug!(partial_outputs = outputs.len(), "Sending consolidation request");

    let start = Instant::now();
    let text = endpoint.complete(&request, credentials).await?;
    info!(
        partial_outputs = outputs.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Consolidation completed"
    );
    Ok(text)
}
