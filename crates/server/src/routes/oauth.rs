//! Google OAuth route handlers.
//!
//! Sign-in is delegated entirely to the directory: we only hold the CSRF
//! state in the session, upsert the account from the returned profile, and
//! redirect. Failures land the browser back on the login page rather than a
//! JSON error, since both endpoints are browser navigations.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use wastecare_core::Email;

use crate::db::UserRepository;
use crate::middleware::set_current_user;
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

use super::ApiResponse;
use super::auth::normalize_email;

/// Where the browser lands after a completed sign-in.
const SIGNED_IN_REDIRECT: &str = "/index.html";

/// Where the browser lands when sign-in fails.
const FAILURE_REDIRECT: &str = "/login.html";

/// Begin Google sign-in.
///
/// GET /auth/google
pub async fn google(State(state): State<AppState>, session: Session) -> Response {
    let Some(directory) = state.directory() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::failure("Google sign-in is not configured")),
        )
            .into_response();
    };

    let csrf_state = Uuid::new_v4().to_string();
    if let Err(e) = session
        .insert(session_keys::OAUTH_STATE, &csrf_state)
        .await
    {
        tracing::error!(error = %e, "Failed to store OAuth state");
        return Redirect::to(FAILURE_REDIRECT).into_response();
    }

    Redirect::to(&directory.authorize_url(&csrf_state)).into_response()
}

/// Query parameters returned by the consent screen.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Complete Google sign-in.
///
/// GET /auth/google/callback
#[instrument(skip(state, session, params))]
pub async fn google_callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Response {
    let Some(directory) = state.directory() else {
        return Redirect::to(FAILURE_REDIRECT).into_response();
    };

    // The stored state is single-use whatever happens next.
    let stored_state: Option<String> = session
        .remove(session_keys::OAUTH_STATE)
        .await
        .ok()
        .flatten();

    let (Some(code), Some(returned_state)) = (params.code, params.state) else {
        tracing::warn!("OAuth callback missing code or state");
        return Redirect::to(FAILURE_REDIRECT).into_response();
    };

    if stored_state.as_deref() != Some(returned_state.as_str()) {
        tracing::warn!("OAuth callback state mismatch");
        return Redirect::to(FAILURE_REDIRECT).into_response();
    }

    let profile = match directory.exchange_code(&code).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::error!(error = %e, "OAuth code exchange failed");
            return Redirect::to(FAILURE_REDIRECT).into_response();
        }
    };

    let email = match Email::parse(&normalize_email(&profile.email)) {
        Ok(email) => email,
        Err(e) => {
            tracing::error!(error = %e, "OAuth profile carried an unusable email");
            return Redirect::to(FAILURE_REDIRECT).into_response();
        }
    };

    let user = match UserRepository::new(state.pool())
        .upsert_google(&email, &profile.name, &profile.subject)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::error!(error = %e, "Failed to upsert Google account");
            return Redirect::to(FAILURE_REDIRECT).into_response();
        }
    };

    let current = CurrentUser {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
    };
    if let Err(e) = set_current_user(&session, &current).await {
        tracing::error!(error = %e, "Failed to store session after OAuth login");
        return Redirect::to(FAILURE_REDIRECT).into_response();
    }

    tracing::info!(user_id = %user.id, "Google sign-in completed");
    Redirect::to(SIGNED_IN_REDIRECT).into_response()
}
