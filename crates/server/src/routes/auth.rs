//! Registration, login, and password-reset route handlers.
//!
//! Domain failures (missing fields, duplicate account, bad code, bad
//! credentials) come back as `{success:false}` bodies; only infrastructure
//! failures surface as error statuses.

use axum::{Json, extract::State, response::{IntoResponse, Response}};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use wastecare_core::{Email, UserId};

use crate::error::AppError;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

use super::ApiResponse;

/// Normalize a submitted email the way accounts are stored.
pub(crate) fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Convert an [`AuthError`] into the structured failure body, or escalate
/// infrastructure errors.
fn domain_failure(e: AuthError) -> Result<ApiResponse, AppError> {
    match e {
        AuthError::InvalidEmail(_) => Ok(ApiResponse::failure("Invalid email address")),
        AuthError::WeakPassword(message) => Ok(ApiResponse::failure(message)),
        AuthError::AccountExists => Ok(ApiResponse::failure("Account already exists")),
        AuthError::UnknownAccount => {
            Ok(ApiResponse::failure("No account found for this email"))
        }
        AuthError::InvalidOtp => Ok(ApiResponse::failure("Invalid or expired OTP")),
        AuthError::InvalidCredentials => Ok(ApiResponse::failure("Invalid credentials")),
        AuthError::Mailer(e) => {
            tracing::error!(error = %e, "Failed to send verification email");
            Ok(ApiResponse::failure(
                "Failed to send verification email. Please try again.",
            ))
        }
        AuthError::PasswordHash => Err(AppError::Internal("password hashing failed".to_string())),
        AuthError::Repository(e) => Err(AppError::Database(e)),
    }
}

// =============================================================================
// Registration
// =============================================================================

/// Request to start a registration.
#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Issue and email a registration code.
///
/// POST /api/register/send-otp
#[instrument(skip(state, req), fields(email = %normalize_email(&req.email)))]
pub async fn send_otp(
    State(state): State<AppState>,
    Json(req): Json<SendOtpRequest>,
) -> Result<Json<ApiResponse>, AppError> {
    let name = req.name.trim();
    let email = normalize_email(&req.email);

    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Ok(Json(ApiResponse::failure("All fields required")));
    }

    let service = AuthService::new(state.pool());
    match service
        .request_registration_otp(state.mailer(), name, &email, &req.password)
        .await
    {
        Ok(()) => Ok(Json(ApiResponse::ok("OTP sent to email"))),
        Err(e) => Ok(Json(domain_failure(e)?)),
    }
}

/// Request to complete a registration.
#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
}

/// Verify the code and create the account.
///
/// POST /api/register/verify-otp
#[instrument(skip(state, req), fields(email = %normalize_email(&req.email)))]
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<Json<ApiResponse>, AppError> {
    let email = normalize_email(&req.email);
    let code = req.otp.trim();

    if email.is_empty() || code.is_empty() {
        return Ok(Json(ApiResponse::failure("All fields required")));
    }

    let service = AuthService::new(state.pool());
    match service.verify_registration_otp(&email, code).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "Account created");
            Ok(Json(ApiResponse::ok("Account created successfully")))
        }
        Err(e) => Ok(Json(domain_failure(e)?)),
    }
}

// =============================================================================
// Login / logout
// =============================================================================

/// Request to log in.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login body: the standard envelope plus minimal account fields.
#[derive(Debug, Serialize)]
struct LoginResponse {
    success: bool,
    message: String,
    user: UserSummary,
}

/// Minimal account fields returned on login.
#[derive(Debug, Serialize)]
struct UserSummary {
    id: UserId,
    name: String,
    email: Email,
}

/// Client password login.
///
/// POST /api/login
#[instrument(skip(state, session, req), fields(email = %normalize_email(&req.email)))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let email = normalize_email(&req.email);

    if email.is_empty() || req.password.is_empty() {
        return Ok(Json(ApiResponse::failure("All fields required")).into_response());
    }

    let service = AuthService::new(state.pool());
    let user = match service.login(&email, &req.password).await {
        Ok(user) => user,
        Err(e) => return Ok(Json(domain_failure(e)?).into_response()),
    };

    let current = CurrentUser {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
    };
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        user: UserSummary {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    })
    .into_response())
}

/// Clear the session.
///
/// POST /api/logout
pub async fn logout(session: Session) -> Result<Json<ApiResponse>, AppError> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    Ok(Json(ApiResponse::ok("Logged out")))
}

// =============================================================================
// Password reset
// =============================================================================

/// Request to start a password reset.
#[derive(Debug, Deserialize)]
pub struct ForgotRequest {
    #[serde(default)]
    pub email: String,
}

/// Issue and email a password-reset code.
///
/// POST /api/send-otp
#[instrument(skip(state, req), fields(email = %normalize_email(&req.email)))]
pub async fn forgot_send_otp(
    State(state): State<AppState>,
    Json(req): Json<ForgotRequest>,
) -> Result<Json<ApiResponse>, AppError> {
    let email = normalize_email(&req.email);

    if email.is_empty() {
        return Ok(Json(ApiResponse::failure("All fields required")));
    }

    let service = AuthService::new(state.pool());
    match service.request_reset_otp(state.mailer(), &email).await {
        Ok(()) => Ok(Json(ApiResponse::ok("OTP sent to email"))),
        Err(e) => Ok(Json(domain_failure(e)?)),
    }
}

/// Request to complete a password reset.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
    #[serde(default, rename = "newPassword")]
    pub new_password: String,
}

/// Verify the code and replace the password.
///
/// POST /api/reset-password
#[instrument(skip(state, req), fields(email = %normalize_email(&req.email)))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse>, AppError> {
    let email = normalize_email(&req.email);
    let code = req.otp.trim();

    if email.is_empty() || code.is_empty() || req.new_password.is_empty() {
        return Ok(Json(ApiResponse::failure("All fields required")));
    }

    let service = AuthService::new(state.pool());
    match service.reset_password(&email, code, &req.new_password).await {
        Ok(()) => Ok(Json(ApiResponse::ok("Password reset successfully"))),
        Err(e) => Ok(Json(domain_failure(e)?)),
    }
}
