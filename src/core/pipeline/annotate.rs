//! Auto-annotation
//!
//! Every frame becomes its own single-frame request so the model describes
//! one still at a time. The requests share the fan-out executor and fail
//! together.

use super::runner::JobRunner;
use crate::core::prompt::MessageFormatter;
use crate::core::providers::Credentials;
use crate::core::types::{FewShotExample, Frame};
use crate::utils::error::{FrameDocError, Result};
use serde::{Deserialize, Serialize};
use std::slice;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Generated annotation for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameAnnotation {
    /// Id of the annotated frame
    pub frame_id: f64,
    /// Frame time, in seconds
    pub time: f64,
    /// Text returned by the model
    pub annotation: String,
}

impl JobRunner {
    /// Annotate every frame concurrently, results in frame order
    pub async fn annotate_frames(
        &self,
        frames: &[Frame],
        few_shot: &[FewShotExample],
        prompt: &str,
        credentials: &Credentials,
    ) -> Result<Vec<FrameAnnotation>> {
        self.annotate_frames_with_cancel(
            frames,
            few_shot,
            prompt,
            credentials,
            &CancellationToken::new(),
        )
        .await
    }

    /// Annotate every frame, giving up with `Cancelled` when `cancel` fires
    /// or the job timeout elapses. A failed frame is reported by its
    /// position in `frames`.
    pub async fn annotate_frames_with_cancel(
        &self,
        frames: &[Frame],
        few_shot: &[FewShotExample],
        prompt: &str,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<Vec<FrameAnnotation>> {
        if prompt.trim().is_empty() {
            return Err(FrameDocError::InvalidConfiguration(
                "annotation prompt must not be empty".to_string(),
            ));
        }
        if frames.is_empty() {
            return Ok(Vec::new());
        }

        info!(frame_count = frames.len(), "Generating frame annotations");
        let formatter = MessageFormatter::new(prompt, few_shot, 1);
        let settings = self.config().deterministic_settings();
        let endpoint = self.endpoint();
        let formatter = &formatter;

        let work = self.executor().execute_all(frames, |_, frame| {
            let request = settings.request(formatter.messages_for_frames(slice::from_ref(frame)));
            async move {
                endpoint
                    .complete(&request, credentials)
                    .await
                    .map(|annotation| FrameAnnotation {
                        frame_id: frame.id,
                        time: frame.time,
                        annotation,
                    })
            }
        });

        self.guarded(cancel, work).await
    }
}
