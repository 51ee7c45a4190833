//! Custom test assertions

use framedoc::core::prompt::CONSOLIDATION_INSTRUCTION;
use framedoc::{ChatRequest, MessageRole};

/// Assertions for captured completion requests
pub trait ChatRequestAssertions {
    /// Assert the request is a consolidation request
    fn assert_consolidation(&self);

    /// Assert the request is a batch request carrying `times`
    fn assert_batch_times(&self, times: &[u64]);
}

impl ChatRequestAssertions for ChatRequest {
    fn assert_consolidation(&self) {
        assert_eq!(self.messages.len(), 2, "Expected system + user message");
        assert!(
            self.messages[0]
                .content
                .to_string()
                .ends_with(CONSOLIDATION_INSTRUCTION),
            "Expected consolidation instruction in system prompt"
        );
    }

    fn assert_batch_times(&self, times: &[u64]) {
        let last = self.messages.last().expect("request has no messages");
        assert_eq!(last.role, MessageRole::User);
        assert_eq!(frame_times(self), times);
    }
}

/// Frame times mentioned in the last (user) message of a request
pub fn frame_times(request: &ChatRequest) -> Vec<u64> {
    let Some(last) = request.messages.last() else {
        return Vec::new();
    };
    last.content
        .to_string()
        .split("Time: ")
        .skip(1)
        .filter_map(|s| s.split('s').next())
        .filter_map(|t| t.parse::<f64>().ok())
        .map(|t| t as u64)
        .collect()
}

/// Whether a request carries the consolidation instruction
pub fn is_consolidation(request: &ChatRequest) -> bool {
    request
        .messages
        .first()
        .is_some_and(|m| m.content.to_string().ends_with(CONSOLIDATION_INSTRUCTION))
}
