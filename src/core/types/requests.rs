//! Chat completion request types

use super::message::ChatMessage;
use serde::{Deserialize, Serialize};

/// Chat completion request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Ordered role-tagged messages
    pub messages: Vec<ChatMessage>,

    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature, omitted to use the provider default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ChatRequest {
    /// Create a request from messages
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Sampling settings applied to one kind of request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestSettings {
    /// Maximum output tokens
    pub max_tokens: u32,
    /// Temperature, `None` leaves it to the provider
    pub temperature: Option<f32>,
}

impl RequestSettings {
    /// Wrap messages into a request using these settings
    pub fn request(&self, messages: Vec<ChatMessage>) -> ChatRequest {
        ChatRequest::new(messages)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
    }
}
