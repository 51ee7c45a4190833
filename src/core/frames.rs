//! Key-frame collection
//!
//! Frames are keyed by capture time rounded to the millisecond. The set keeps
//! them in capture order, which is also the order they are submitted in.

use crate::core::types::Frame;
use crate::services::ThumbnailUploader;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Round a time in seconds to milliseconds
pub fn round_to_millis(time: f64) -> f64 {
    (time * 1000.0).round() / 1000.0
}

/// Evenly spaced capture times `i * duration / count` for `i` in `1..=count`
fn interval_times(duration: f64, count: usize) -> Vec<f64> {
    if count == 0 || !duration.is_finite() || duration <= 0.0 {
        return Vec::new();
    }
    let interval = duration / count as f64;
    (1..=count).map(|i| i as f64 * interval).collect()
}

/// Ordered set of captured key frames
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyFrameSet {
    frames: Vec<Frame>,
}

impl KeyFrameSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame captured at `time`. Returns `false` when a frame with the
    /// same rounded time already exists.
    pub fn capture(&mut self, time: f64, thumbnail_url: impl Into<String>) -> bool {
        let time = round_to_millis(time);
        if self.get(time).is_some() {
            debug!(time, "Frame already captured");
            return false;
        }
        self.frames.push(Frame::new(time, thumbnail_url));
        true
    }

    /// Capture `count` evenly spaced frames over `duration` seconds, asking
    /// `thumbnail` for the still at each time. Returns the number added.
    pub fn capture_at_intervals<F>(
        &mut self,
        duration: f64,
        count: usize,
        mut thumbnail: F,
    ) -> usize
    where
        F: FnMut(f64) -> String,
    {
        let mut added = 0;
        for time in interval_times(duration, count) {
            let time = round_to_millis(time);
            if self.get(time).is_none() && self.capture(time, thumbnail(time)) {
                added += 1;
            }
        }
        debug!(duration, count, added, "Captured frames at intervals");
        added
    }

    /// Frame by id
    pub fn get(&self, id: f64) -> Option<&Frame> {
        self.frames.iter().find(|f| f.id == id)
    }

    fn get_mut(&mut self, id: f64) -> Option<&mut Frame> {
        self.frames.iter_mut().find(|f| f.id == id)
    }

    /// Swap a frame's thumbnail, returns whether the frame exists
    pub fn replace_thumbnail(&mut self, id: f64, url: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(frame) => {
                frame.thumbnail_url = url.into();
                true
            }
            None => false,
        }
    }

    /// Set a frame's annotation, returns whether the frame exists
    pub fn annotate(&mut self, id: f64, annotation: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(frame) => {
                frame.annotation = annotation.into();
                true
            }
            None => false,
        }
    }

    /// Delete a frame together with its annotation
    pub fn remove(&mut self, id: f64) -> Option<Frame> {
        let position = self.frames.iter().position(|f| f.id == id)?;
        Some(self.frames.remove(position))
    }

    /// Frames in capture order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Upload every local `data:` thumbnail and point its frame at the
    /// returned URL. Stops at the first failed upload; frames uploaded
    /// before it keep their new URL. Returns the number of uploads.
    pub async fn upload_pending(&mut self, uploader: &dyn ThumbnailUploader) -> Result<usize> {
        let mut uploaded = 0;
        for frame in self.frames.iter_mut().filter(|f| f.has_local_thumbnail()) {
            frame.thumbnail_url = uploader.upload(&frame.thumbnail_url).await?;
            uploaded += 1;
        }
        if uploaded > 0 {
            info!(uploaded, "Uploaded local thumbnails");
        }
        Ok(uploaded)
    }

    /// Consume the set, yielding the frames
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

impl From<Vec<Frame>> for KeyFrameSet {
    fn from(frames: Vec<Frame>) -> Self {
        Self { frames }
    }
}
