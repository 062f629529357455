//! Chat transcript domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use wastecare_core::{ChatMessageId, ChatRole, UserId};

/// A line in the chatbot transcript. Append-only.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Unique message ID.
    pub id: ChatMessageId,
    /// Account the line belongs to; `None` for guest exchanges.
    pub user_id: Option<UserId>,
    /// Who produced the line.
    pub role: ChatRole,
    /// The message text.
    pub message: String,
    /// When the line was appended.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_serialization() {
        let line = ChatMessage {
            id: ChatMessageId::new(1),
            user_id: None,
            role: ChatRole::Assistant,
            message: "Collection runs every Tuesday.".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"role\":\"assistant\""));
        assert!(json.contains("\"user_id\":null"));
    }
}
