//! Prompt and message construction
//!
//! Turns job constants and frame batches into chat messages, and holds the
//! scenario prompt presets.

pub mod formatter;
pub mod scenarios;

pub use formatter::{
    CHUNKED_PROMPT_NOTE, CONSOLIDATION_INSTRUCTION, FEW_SHOT_MARKER, MessageFormatter,
    PARTIAL_OUTPUT_SEPARATOR, build_consolidation_messages, build_messages,
    extend_prompt_for_batches, few_shot_messages, frame_parts,
};
pub use scenarios::Scenario;
