//! Upstream error extraction

use crate::core::types::ChatResponse;
use crate::utils::error::UpstreamError;
use serde_json::Value;

/// Pull a readable message out of an error body. Understands the OpenAI and
/// Azure `{"error": {"code", "message"}}` shape and falls back to the raw body.
pub fn extract_error_message(body: &str) -> String {
    let Ok(response) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };

    if let Some(error) = response.get("error") {
        let message = error.get("message").and_then(Value::as_str);
        let code = error.get("code").and_then(Value::as_str);
        match (code, message) {
            (Some(code), Some(message)) => return format!("{}: {}", code, message),
            (None, Some(message)) => return message.to_string(),
            _ => {}
        }
        if let Some(text) = error.as_str() {
            return text.to_string();
        }
    }

    response.to_string()
}

/// Map a non-success response to an upstream error
pub fn status_error(status: u16, body: &str) -> UpstreamError {
    let message = if body.trim().is_empty() {
        "Empty error response".to_string()
    } else {
        extract_error_message(body)
    };
    UpstreamError::status(status, message)
}

/// Text of the first choice, or a malformed-response error
pub fn first_choice_text(response: &ChatResponse) -> Result<String, UpstreamError> {
    if response.choices.is_empty() {
        return Err(UpstreamError::malformed("response contains no choices"));
    }
    response
        .first_content()
        .map(str::to_string)
        .ok_or_else(|| UpstreamError::malformed("first choice has no message content"))
}
