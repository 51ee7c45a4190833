//! Chat completion response types

use serde::{Deserialize, Serialize};

/// Chat completion response. Only `choices` is required, Azure and
/// OpenAI-compatible servers disagree on the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Response id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Model that served the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Choice list
    pub choices: Vec<ChatChoice>,

    /// Usage statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatResponse {
    /// Text of the first choice
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

/// Response choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    /// Choice index
    #[serde(default)]
    pub index: u32,

    /// Response message
    pub message: ResponseMessage,

    /// Completion reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Assistant message inside a choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMessage {
    /// Role, normally "assistant"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Generated text, null when the model returned no content
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    /// Prompt token count
    pub prompt_tokens: u32,
    /// Completion token count
    pub completion_tokens: u32,
    /// Total token count
    pub total_tokens: u32,
}
