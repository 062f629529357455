//! Chat transcript repository. Append-only.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use wastecare_core::{ChatMessageId, ChatRole, UserId};

use super::RepositoryError;
use crate::models::ChatMessage;

/// Internal row type for chat message queries.
#[derive(Debug, sqlx::FromRow)]
struct ChatMessageRow {
    id: ChatMessageId,
    user_id: Option<UserId>,
    role: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ChatMessageRow> for ChatMessage {
    type Error = RepositoryError;

    fn try_from(row: ChatMessageRow) -> Result<Self, Self::Error> {
        let role: ChatRole = row.role.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid chat role in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            role,
            message: row.message,
            created_at: row.created_at,
        })
    }
}

/// Repository for the chatbot transcript.
pub struct ChatLogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ChatLogRepository<'a> {
    /// Create a new chat log repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append a line to the transcript.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including a
    /// `user_id` that references no account).
    pub async fn append(
        &self,
        user_id: Option<UserId>,
        role: ChatRole,
        message: &str,
    ) -> Result<ChatMessage, RepositoryError> {
        let row = sqlx::query_as::<_, ChatMessageRow>(
            "INSERT INTO wastecare.chat_message (user_id, role, message) \
             VALUES ($1, $2, $3) \
             RETURNING id, user_id, role, message, created_at",
        )
        .bind(user_id)
        .bind(role.as_str())
        .bind(message)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }
}
