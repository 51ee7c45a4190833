//! HTTP chat completion client
//!
//! Posts OpenAI-format chat requests to an Azure OpenAI style deployment URL
//! with the key in the `api-key` header.

use super::credentials::Credentials;
use super::endpoint::CompletionEndpoint;
use super::error::{first_choice_text, status_error};
use crate::core::types::{ChatRequest, ChatResponse};
use crate::utils::error::{FrameDocError, Result, UpstreamError};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use tracing::{debug, error};

/// Default per-request timeout, LLM generation over many images is slow
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

/// reqwest-backed completion endpoint
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    http: reqwest::Client,
}

impl HttpCompletionClient {
    /// Create a client with the default request timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client with a per-request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("framedoc/", env!("CARGO_PKG_VERSION"))),
        );

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| FrameDocError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl CompletionEndpoint for HttpCompletionClient {
    async fn complete(
        &self,
        request: &ChatRequest,
        credentials: &Credentials,
    ) -> std::result::Result<String, UpstreamError> {
        debug!(
            endpoint = credentials.endpoint(),
            messages = request.messages.len(),
            max_tokens = request.max_tokens,
            temperature = request.temperature,
            "Sending chat completion request"
        );

        let response = self
            .http
            .post(credentials.endpoint())
            .header("api-key", credentials.api_key())
            .json(request)
            .send()
            .await
            .map_err(UpstreamError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = status.as_u16(), body = %body, "Completion endpoint returned an error");
            return Err(status_error(status.as_u16(), &body));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::malformed(e.to_string()))?;

        if let Some(usage) = &body.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion usage"
            );
        }

        first_choice_text(&body)
    }
}
