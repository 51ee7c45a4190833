//! Resolved endpoint credentials

use crate::utils::error::{FrameDocError, Result};
use url::Url;

/// API key and endpoint URL, resolved by the caller and passed explicitly
/// into every dispatch
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    endpoint: String,
}

impl Credentials {
    /// Validate and wrap credentials. Both values must be present and the
    /// endpoint must be an http(s) URL.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        let endpoint = endpoint.into().trim().to_string();

        if api_key.is_empty() {
            return Err(FrameDocError::InvalidConfiguration(
                "API key is missing".to_string(),
            ));
        }
        if endpoint.is_empty() {
            return Err(FrameDocError::InvalidConfiguration(
                "Endpoint is missing".to_string(),
            ));
        }

        let url = Url::parse(&endpoint).map_err(|e| {
            FrameDocError::InvalidConfiguration(format!("Endpoint is not a valid URL: {}", e))
        })?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(FrameDocError::InvalidConfiguration(format!(
                    "Endpoint must use http:// or https:// scheme, got: {}",
                    scheme
                )));
            }
        }

        Ok(Self { api_key, endpoint })
    }

    /// API key sent in the `api-key` header
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Full completion URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
