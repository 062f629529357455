//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::email::EmailError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] wastecare_core::EmailError),

    /// Invalid credentials (wrong password, unknown account, or an account
    /// with no local password). Deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account already exists for the email.
    #[error("account already exists")]
    AccountExists,

    /// No local account exists for the email (password-reset flow).
    #[error("no local account for this email")]
    UnknownAccount,

    /// The one-time code is wrong, expired, or was never issued.
    /// Deliberately indistinguishable.
    #[error("invalid or expired code")]
    InvalidOtp,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Outbound email delivery failed.
    #[error("email delivery error: {0}")]
    Mailer(#[from] EmailError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
