//! Thumbnail upload
//!
//! Captured thumbnails start as `data:` URIs. Before a job runs they are
//! posted to an upload service that stores them and answers with a URL the
//! completion endpoint can fetch.

use crate::utils::error::{FrameDocError, Result};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::multipart;
use serde::Deserialize;
use tracing::{debug, error};
use url::Url;

/// Stores a thumbnail and returns its remote URL
#[async_trait]
pub trait ThumbnailUploader: Send + Sync {
    /// Upload a `data:` URI
    async fn upload(&self, data_uri: &str) -> Result<String>;
}

/// Split a base64 `data:` URI into its MIME type and decoded bytes
pub fn decode_data_uri(data_uri: &str) -> Result<(String, Vec<u8>)> {
    let rest = data_uri
        .strip_prefix("data:")
        .ok_or_else(|| FrameDocError::Upload("thumbnail is not a data URI".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| FrameDocError::Upload("data URI has no payload".to_string()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| FrameDocError::Upload("data URI is not base64 encoded".to_string()))?;

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| FrameDocError::Upload(format!("Invalid base64 payload: {}", e)))?;

    let mime = if mime.is_empty() { "image/png" } else { mime };
    Ok((mime.to_string(), bytes))
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// Posts thumbnails as multipart form data
#[derive(Debug, Clone)]
pub struct HttpThumbnailUploader {
    http: reqwest::Client,
    upload_url: Url,
}

impl HttpThumbnailUploader {
    /// Uploader for the given service URL. Uploads are sent with `type=image`.
    pub fn new(upload_url: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), upload_url)
    }

    /// Uploader with a preconfigured client
    pub fn with_client(http: reqwest::Client, upload_url: &str) -> Result<Self> {
        let mut upload_url = Url::parse(upload_url).map_err(|e| {
            FrameDocError::InvalidConfiguration(format!("Invalid upload URL: {}", e))
        })?;
        upload_url.query_pairs_mut().append_pair("type", "image");
        Ok(Self { http, upload_url })
    }
}

#[async_trait]
impl ThumbnailUploader for HttpThumbnailUploader {
    async fn upload(&self, data_uri: &str) -> Result<String> {
        let (mime, bytes) = decode_data_uri(data_uri)?;
        let file_name = format!("image_{}.png", chrono::Utc::now().timestamp_millis());
        debug!(file_name = %file_name, bytes = bytes.len(), "Uploading thumbnail");

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&mime)
            .map_err(|e| FrameDocError::Upload(format!("Invalid MIME type: {}", e)))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(self.upload_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| FrameDocError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "Thumbnail upload failed");
            return Err(FrameDocError::Upload(format!(
                "HTTP error! status: {}",
                status.as_u16()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| FrameDocError::Upload(format!("Invalid upload response: {}", e)))?;
        Ok(body.url)
    }
}
