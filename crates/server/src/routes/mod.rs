//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                            - Liveness check
//! GET  /health/ready                      - Readiness check (database ping)
//!
//! # Registration / login
//! POST /api/register/send-otp             - Issue + email a registration code
//! POST /api/register/verify-otp           - Verify the code, create the account
//! POST /api/login                         - Client password login
//! POST /api/logout                        - Clear the session
//!
//! # Password reset
//! POST /api/send-otp                      - Issue + email a reset code
//! POST /api/reset-password                - Verify the code, replace the password
//!
//! # Contact form
//! POST /api/contact                       - Submit a message (creates a notification)
//!
//! # Admin dashboard (admin session required past login)
//! POST /api/admin/login                   - Admin password login
//! GET  /api/admin/messages                - All contact messages, newest first
//! POST /api/admin/messages/{id}/read      - Mark a message read
//! POST /api/admin/messages/{id}/replied   - Mark a message replied
//! GET  /api/admin/notifications           - Recent notifications
//! POST /api/admin/notifications/{id}/read - Acknowledge a notification
//!
//! # Chatbot proxy
//! POST /api/chat                          - One message in, one reply out
//!
//! # Google OAuth
//! GET  /auth/google                       - Redirect to the consent screen
//! GET  /auth/google/callback              - Complete sign-in
//! ```

pub mod admin;
pub mod auth;
pub mod chat;
pub mod contact;
pub mod oauth;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;

/// Standard response body for mutating endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
}

impl ApiResponse {
    /// A successful outcome.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A failed outcome.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Registration / login
        .route("/api/register/send-otp", post(auth::send_otp))
        .route("/api/register/verify-otp", post(auth::verify_otp))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        // Password reset
        .route("/api/send-otp", post(auth::forgot_send_otp))
        .route("/api/reset-password", post(auth::reset_password))
        // Contact form
        .route("/api/contact", post(contact::submit))
        // Admin dashboard
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/messages", get(admin::list_messages))
        .route(
            "/api/admin/messages/{id}/read",
            post(admin::mark_message_read),
        )
        .route(
            "/api/admin/messages/{id}/replied",
            post(admin::mark_message_replied),
        )
        .route("/api/admin/notifications", get(admin::list_notifications))
        .route(
            "/api/admin/notifications/{id}/read",
            post(admin::mark_notification_read),
        )
        // Chatbot proxy
        .route("/api/chat", post(chat::chat))
        // Google OAuth
        .route("/auth/google", get(oauth::google))
        .route("/auth/google/callback", get(oauth::google_callback))
}
