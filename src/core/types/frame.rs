//! Key frames and few-shot exemplars

use serde::{Deserialize, Serialize};

/// A captured video still with its timestamp, image reference and annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Frame id, equal to the capture time
    pub id: f64,
    /// Position in the video, in seconds
    pub time: f64,
    /// Local `data:` URI or remote URL, never dereferenced by the engine
    pub thumbnail_url: String,
    /// Operator annotation, may be empty
    #[serde(default)]
    pub annotation: String,
}

impl Frame {
    /// Frame without annotation
    pub fn new(time: f64, thumbnail_url: impl Into<String>) -> Self {
        Self {
            id: time,
            time,
            thumbnail_url: thumbnail_url.into(),
            annotation: String::new(),
        }
    }

    /// Set the annotation
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = annotation.into();
        self
    }

    /// Whether the frame carries annotation text
    pub fn has_annotation(&self) -> bool {
        !self.annotation.is_empty()
    }

    /// Whether the thumbnail is still a local data URI
    pub fn has_local_thumbnail(&self) -> bool {
        self.thumbnail_url.starts_with("data:")
    }
}

/// Exemplar image plus description sent with every request as fixed context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FewShotExample {
    /// Image URL
    pub image: String,
    /// What the image shows
    pub description: String,
}

impl FewShotExample {
    /// Create an exemplar
    pub fn new(image: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            description: description.into(),
        }
    }
}
