//! Contact inbox repository: messages and their derived notifications.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use wastecare_core::{ContactMessageId, MessageStatus, NotificationId};

use super::RepositoryError;
use crate::models::{ContactMessage, NewContactMessage, Notification};

const MESSAGE_COLUMNS: &str = "id, name, email, subject, message, status, created_at, updated_at";
const NOTIFICATION_COLUMNS: &str = "id, title, message, is_read, created_at";

/// How many notifications the dashboard fetches.
const NOTIFICATION_LIMIT: i64 = 20;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for contact message queries.
#[derive(Debug, sqlx::FromRow)]
struct ContactMessageRow {
    id: ContactMessageId,
    name: String,
    email: String,
    subject: Option<String>,
    message: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ContactMessageRow> for ContactMessage {
    type Error = RepositoryError;

    fn try_from(row: ContactMessageRow) -> Result<Self, Self::Error> {
        let status: MessageStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid message status in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            email: row.email,
            subject: row.subject,
            message: row.message,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Internal row type for notification queries.
#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: NotificationId,
    title: String,
    message: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the contact inbox.
pub struct ContactRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a contact message and its derived notification.
    ///
    /// Both rows are written in one transaction: a submission produces
    /// exactly one notification or nothing at all.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either insert fails.
    pub async fn create_with_notification(
        &self,
        submission: &NewContactMessage,
    ) -> Result<(ContactMessage, Notification), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let message_row = sqlx::query_as::<_, ContactMessageRow>(&format!(
            "INSERT INTO wastecare.contact_message (name, email, subject, message) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(submission.subject.as_deref())
        .bind(&submission.message)
        .fetch_one(&mut *tx)
        .await?;

        let notification_row = sqlx::query_as::<_, NotificationRow>(&format!(
            "INSERT INTO wastecare.notification (title, message) \
             VALUES ($1, $2) \
             RETURNING {NOTIFICATION_COLUMNS}"
        ))
        .bind(NewContactMessage::NOTIFICATION_TITLE)
        .bind(submission.notification_body())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((message_row.try_into()?, notification_row.into()))
    }

    /// All contact messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list_messages(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContactMessageRow>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM wastecare.contact_message ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Move a message's status forward.
    ///
    /// The guard lives in the statement itself so a stale admin click can
    /// never move the lifecycle backward. A request that isn't a forward move
    /// (same state, or `replied` already) is an idempotent no-op returning
    /// the current status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the message doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_message_status(
        &self,
        id: ContactMessageId,
        target: MessageStatus,
    ) -> Result<MessageStatus, RepositoryError> {
        let updated = sqlx::query_as::<_, ContactMessageRow>(&format!(
            "UPDATE wastecare.contact_message \
             SET status = $2 \
             WHERE id = $1 \
               AND CASE status \
                     WHEN 'new' THEN $2 IN ('read', 'replied') \
                     WHEN 'read' THEN $2 = 'replied' \
                     ELSE FALSE \
                   END \
             RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(id)
        .bind(target.as_str())
        .fetch_optional(self.pool)
        .await?;

        if let Some(row) = updated {
            let message: ContactMessage = row.try_into()?;
            return Ok(message.status);
        }

        // Nothing updated: either the message is unknown or the transition
        // wasn't a forward move. Report the current status in the latter case.
        let current = sqlx::query_scalar::<_, String>(
            "SELECT status FROM wastecare.contact_message WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        current.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid message status in database: {e}"))
        })
    }

    /// The most recent notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_notifications(&self) -> Result<Vec<Notification>, RepositoryError> {
        let rows = sqlx::query_as::<_, NotificationRow>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM wastecare.notification \
             ORDER BY created_at DESC LIMIT {NOTIFICATION_LIMIT}"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Mark a notification as read.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the notification doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn mark_notification_read(
        &self,
        id: NotificationId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE wastecare.notification SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
