//! Contact inbox domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use wastecare_core::{ContactMessageId, MessageStatus, NotificationId};

/// A contact-form submission in the admin inbox.
///
/// Serialized directly by the admin list endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    /// Unique message ID.
    pub id: ContactMessageId,
    /// Submitter's name.
    pub name: String,
    /// Submitter's email address.
    pub email: String,
    /// Optional subject line.
    pub subject: Option<String>,
    /// Message body.
    pub message: String,
    /// Inbox lifecycle state.
    pub status: MessageStatus,
    /// When the message was submitted.
    pub created_at: DateTime<Utc>,
    /// When the message was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A validated contact-form submission, ready to insert.
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl NewContactMessage {
    /// Title of the notification derived from this submission.
    pub const NOTIFICATION_TITLE: &'static str = "New Contact Message";

    /// Body of the notification derived from this submission.
    #[must_use]
    pub fn notification_body(&self) -> String {
        format!("{} sent a message", self.name)
    }
}

/// An admin-facing notification derived from a contact submission.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    /// Unique notification ID.
    pub id: NotificationId,
    /// Short title.
    pub title: String,
    /// Notification body.
    pub message: String,
    /// Whether an admin has acknowledged it.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}
