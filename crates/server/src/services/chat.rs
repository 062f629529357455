//! Chatbot orchestration.
//!
//! The proxy flow is deliberately thin: optionally persist the visitor's
//! line, forward it with the fixed system prompt, relay the reply, optionally
//! persist that too. Any upstream failure degrades to a fixed fallback
//! string; a transcript write failure never fails the exchange.

use sqlx::PgPool;
use tracing::instrument;

use wastecare_core::{ChatRole, UserId};

use crate::completions::CompletionClient;
use crate::db::ChatLogRepository;

/// Fixed system prompt sent with every exchange.
pub const SYSTEM_PROMPT: &str =
    "You are WasteCare AI Customer Support. Be professional and concise.";

/// Reply for an empty message. The external service is not contacted.
pub const EMPTY_MESSAGE_REPLY: &str = "Message is required";

/// Reply when the external service fails in any way.
pub const FALLBACK_REPLY: &str = "AI service unavailable";

/// Chatbot service.
pub struct ChatService<'a> {
    log: ChatLogRepository<'a>,
    client: &'a dyn CompletionClient,
}

impl<'a> ChatService<'a> {
    /// Create a new chat service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, client: &'a dyn CompletionClient) -> Self {
        Self {
            log: ChatLogRepository::new(pool),
            client,
        }
    }

    /// Run one exchange and return the reply text.
    ///
    /// Lines are persisted only when the exchange belongs to an account, and
    /// only genuine replies are persisted — the fallback string never enters
    /// the transcript.
    #[instrument(skip(self, raw_message), fields(user_id = ?user_id))]
    pub async fn handle(&self, user_id: Option<UserId>, raw_message: &str) -> String {
        let message = raw_message.trim();
        if message.is_empty() {
            return EMPTY_MESSAGE_REPLY.to_string();
        }

        if let Some(id) = user_id
            && let Err(e) = self.log.append(Some(id), ChatRole::User, message).await
        {
            tracing::warn!(error = %e, "Failed to persist chat message");
        }

        let Some(reply) = fetch_reply(self.client, message).await else {
            return FALLBACK_REPLY.to_string();
        };

        if let Some(id) = user_id
            && let Err(e) = self.log.append(Some(id), ChatRole::Assistant, &reply).await
        {
            tracing::warn!(error = %e, "Failed to persist chat reply");
        }

        reply
    }
}

/// Call the completion service, flattening every failure to `None`.
async fn fetch_reply(client: &dyn CompletionClient, message: &str) -> Option<String> {
    match client.complete(SYSTEM_PROMPT, message).await {
        Ok(reply) => Some(reply),
        Err(e) => {
            tracing::error!(error = %e, "Completion request failed");
            None
        }
    }
}
