//! Contact form route handler.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use crate::db::ContactRepository;
use crate::error::AppError;
use crate::models::NewContactMessage;
use crate::state::AppState;

use super::ApiResponse;
use super::auth::normalize_email;

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Submit a contact message.
///
/// POST /api/contact
///
/// Stores the message and, in the same transaction, the admin notification
/// it gives rise to.
#[instrument(skip(state, form), fields(email = %normalize_email(&form.email)))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<Json<ApiResponse>, AppError> {
    let name = form.name.trim();
    let email = normalize_email(&form.email);
    let message = form.message.trim();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Ok(Json(ApiResponse::failure("All fields required")));
    }

    let subject = form
        .subject
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned);

    let submission = NewContactMessage {
        name: name.to_owned(),
        email,
        subject,
        message: message.to_owned(),
    };

    let (stored, notification) = ContactRepository::new(state.pool())
        .create_with_notification(&submission)
        .await?;

    tracing::info!(
        message_id = %stored.id,
        notification_id = %notification.id,
        "Contact message received"
    );

    Ok(Json(ApiResponse::ok("Message sent successfully")))
}
