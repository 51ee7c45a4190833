//! Request message construction
//!
//! Builds the role-tagged message lists for batch requests and for the
//! consolidation request. Few-shot grounding always comes before the
//! frame content, and each frame's annotation sits directly before that
//! frame's image so the model can pair them.

use crate::core::batch::Batch;
use crate::core::types::{
    ChatMessage, ContentPart, FewShotExample, Frame, system_message, user_message,
};

/// Appended to the system prompt when a job needs more than one batch
pub const CHUNKED_PROMPT_NOTE: &str =
    "\n\nDue to the large number of images, they will be processed in chunks.";

/// Marker preceding the few-shot exemplars
pub const FEW_SHOT_MARKER: &str = "Novel Object Reference (May not appear)";

/// Appended to the system prompt of the consolidation request
pub const CONSOLIDATION_INSTRUCTION: &str = "\n\nThe following are partial outputs from processing video key frames in chunks. Please consolidate them into a coherent final output.";

/// Separator between partial outputs in the consolidation request
pub const PARTIAL_OUTPUT_SEPARATOR: &str = "\n\n----------------------------------------\n\n";

/// Per-job message builder. Holds the job constants that every batch
/// request shares and never changes them after construction.
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    system_prompt: String,
    few_shot: Vec<ChatMessage>,
}

impl MessageFormatter {
    /// Prepare the shared context for a job split into `batch_count` batches
    pub fn new(prompt: &str, few_shot: &[FewShotExample], batch_count: usize) -> Self {
        Self {
            system_prompt: extend_prompt_for_batches(prompt, batch_count),
            few_shot: few_shot_messages(few_shot),
        }
    }

    /// System prompt sent with every batch
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Messages for one batch: system prompt, few-shot block, frame content
    pub fn build_messages(&self, batch: &Batch) -> Vec<ChatMessage> {
        self.messages_for_frames(&batch.items)
    }

    /// Messages for an arbitrary frame slice
    pub fn messages_for_frames(&self, frames: &[Frame]) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.few_shot.len() + 2);
        messages.push(system_message(self.system_prompt.clone()));
        messages.extend(self.few_shot.iter().cloned());
        messages.push(user_message(frame_parts(frames)));
        messages
    }
}

/// Build the messages for one batch of a job with `batch_count` batches
pub fn build_messages(
    prompt: &str,
    few_shot: &[FewShotExample],
    batch: &Batch,
    batch_count: usize,
) -> Vec<ChatMessage> {
    MessageFormatter::new(prompt, few_shot, batch_count).build_messages(batch)
}

/// System prompt, with the chunking note when the model sees only part of the job
pub fn extend_prompt_for_batches(prompt: &str, batch_count: usize) -> String {
    if batch_count > 1 {
        format!("{}{}", prompt, CHUNKED_PROMPT_NOTE)
    } else {
        prompt.to_string()
    }
}

/// Few-shot block: empty without exemplars, otherwise the marker followed
/// by one message per exemplar
pub fn few_shot_messages(examples: &[FewShotExample]) -> Vec<ChatMessage> {
    if examples.is_empty() {
        return Vec::new();
    }

    std::iter::once(system_message(FEW_SHOT_MARKER))
        .chain(examples.iter().map(|example| {
            system_message(vec![
                ContentPart::text(format!("Description: {}", example.description)),
                ContentPart::image(example.image.clone()),
            ])
        }))
        .collect()
}

/// Content parts for a frame sequence, in frame order
pub fn frame_parts(frames: &[Frame]) -> Vec<ContentPart> {
    let mut parts = Vec::with_capacity(frames.len() * 3);
    for frame in frames {
        parts.push(ContentPart::text(format!(
            "Time: {}s, Image URL: {}",
            frame.time, frame.thumbnail_url
        )));
        if frame.has_annotation() {
            parts.push(ContentPart::text(format!("Annotation: {}", frame.annotation)));
        }
        parts.push(ContentPart::image(frame.thumbnail_url.clone()));
    }
    parts
}

/// Consolidation messages: extended system prompt, then the ordered partial
/// outputs joined with a visible separator in one user message
pub fn build_consolidation_messages(prompt: &str, outputs: &[String]) -> Vec<ChatMessage> {
    vec![
        system_message(format!("{}{}", prompt, CONSOLIDATION_INSTRUCTION)),
        user_message(outputs.join(PARTIAL_OUTPUT_SEPARATOR)),
    ]
}
