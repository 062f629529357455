//! Types for the chat-completions API.
//!
//! These types match the `OpenAI` chat-completions wire format.

use serde::{Deserialize, Serialize};

/// A message in a completion conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    /// The role of the message sender ("system", "user" or "assistant").
    pub role: String,
    /// The content of the message.
    pub content: String,
}

impl ApiMessage {
    /// A system-role message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// A user-role message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for the chat-completions API.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    /// Model to use (e.g., "gpt-4o-mini").
    pub model: String,
    /// Conversation messages (system prompt + the single user message).
    pub messages: Vec<ApiMessage>,
}

/// Response from the chat-completions API.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    /// Candidate replies; the first is used.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl CompletionResponse {
    /// The reply text of the first choice, if any.
    #[must_use]
    pub fn first_reply(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
    }
}

/// One candidate reply.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The assistant message.
    pub message: ApiMessage,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ApiMessage::system("Be helpful."), ApiMessage::user("Hi")],
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"gpt-4o-mini\""));
        assert!(json.contains("\"role\":\"system\""));
        assert!(json.contains("\"role\":\"user\""));
    }

    #[test]
    fn test_response_first_reply() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Tuesdays."}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2}
        }"#;

        let response: CompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_reply(), Some("Tuesdays."));
    }

    #[test]
    fn test_response_without_choices() {
        let response: CompletionResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.first_reply(), None);
    }
}
