//! Admin dashboard route handlers.
//!
//! Everything past login requires an admin session; the dashboard front-end
//! polls the two list endpoints and re-renders.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use wastecare_core::{ContactMessageId, MessageStatus, NotificationId};

use crate::db::ContactRepository;
use crate::error::AppError;
use crate::middleware::{RequireAdmin, set_current_user};
use crate::models::{ContactMessage, CurrentUser, Notification};
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

use super::ApiResponse;
use super::auth::normalize_email;

/// Request to log in as admin.
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Admin password login.
///
/// POST /api/admin/login
#[instrument(skip(state, session, req), fields(email = %normalize_email(&req.email)))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<AdminLoginRequest>,
) -> Result<Json<ApiResponse>, AppError> {
    let email = normalize_email(&req.email);

    if email.is_empty() || req.password.is_empty() {
        return Ok(Json(ApiResponse::failure("Email and password required")));
    }

    let service = AuthService::new(state.pool());
    let user = match service.admin_login(&email, &req.password).await {
        Ok(user) => user,
        // Client accounts and bad passwords fail identically.
        Err(AuthError::InvalidCredentials | AuthError::InvalidEmail(_)) => {
            return Ok(Json(ApiResponse::failure("Invalid credentials")));
        }
        Err(AuthError::Repository(e)) => return Err(AppError::Database(e)),
        Err(e) => return Err(AppError::Internal(e.to_string())),
    };

    let current = CurrentUser {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
    };
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    Ok(Json(ApiResponse::ok("Admin login successful")))
}

/// All contact messages, newest first.
///
/// GET /api/admin/messages
pub async fn list_messages(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<ContactMessage>>, AppError> {
    let messages = ContactRepository::new(state.pool()).list_messages().await?;
    Ok(Json(messages))
}

/// Recent notifications, newest first.
///
/// GET /api/admin/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Notification>>, AppError> {
    let notifications = ContactRepository::new(state.pool())
        .list_notifications()
        .await?;
    Ok(Json(notifications))
}

/// Mark a contact message read.
///
/// POST /api/admin/messages/{id}/read
pub async fn mark_message_read(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    transition_message(state, admin, id, MessageStatus::Read).await
}

/// Mark a contact message replied.
///
/// POST /api/admin/messages/{id}/replied
pub async fn mark_message_replied(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    transition_message(state, admin, id, MessageStatus::Replied).await
}

/// Shared forward-transition handler.
async fn transition_message(
    state: AppState,
    admin: CurrentUser,
    id: i32,
    target: MessageStatus,
) -> Result<Response, AppError> {
    let repo = ContactRepository::new(state.pool());
    let status = repo
        .set_message_status(ContactMessageId::new(id), target)
        .await?;

    tracing::info!(
        admin_id = %admin.id,
        message_id = id,
        status = %status,
        "Contact message status updated"
    );

    Ok(Json(ApiResponse::ok(format!("Message marked {status}"))).into_response())
}

/// Acknowledge a notification.
///
/// POST /api/admin/notifications/{id}/read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse>, AppError> {
    ContactRepository::new(state.pool())
        .mark_notification_read(NotificationId::new(id))
        .await?;

    Ok(Json(ApiResponse::ok("Notification marked read")))
}
