//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! wastecare-cli admin create -e owner@wastecare.example -n "WasteCare Admin" -p <password>
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

use thiserror::Error;

use wastecare_core::{Email, UserRole};
use wastecare_server::db::{RepositoryError, UserRepository, create_pool};
use wastecare_server::services::hash_password;

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Password hashing failed.
    #[error("Failed to hash password")]
    PasswordHash,

    /// Account already exists.
    #[error("An account already exists with email: {0}")]
    AccountExists(String),
}

/// Create a new admin account.
///
/// The account is created verified with the admin role; the password should
/// be changed after first login.
///
/// # Arguments
///
/// * `email` - Admin's email address
/// * `name` - Admin's display name
/// * `password` - Initial password
///
/// # Returns
///
/// The ID of the created admin account.
///
/// # Errors
///
/// Returns `AdminError` if the email is invalid, the account exists, or the
/// database is unreachable.
pub async fn create_admin(email: &str, name: &str, password: &str) -> Result<i32, AdminError> {
    dotenvy::dotenv().ok();

    let email = Email::parse(&email.trim().to_lowercase())
        .map_err(|e| AdminError::InvalidEmail(e.to_string()))?;

    let database_url = std::env::var("DATABASE_URL")
        .map(secrecy::SecretString::from)
        .map_err(|_| AdminError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = create_pool(&database_url).await?;

    tracing::info!("Creating admin account: {}", email);

    let users = UserRepository::new(&pool);
    if users.exists_by_email(email.as_str()).await? {
        return Err(AdminError::AccountExists(email.into_inner()));
    }

    let password_hash = hash_password(password).map_err(|_| AdminError::PasswordHash)?;

    let user = users
        .create_local(&email, name, &password_hash, UserRole::Admin, true)
        .await?;

    tracing::info!(
        "Admin account created successfully! ID: {}, Email: {}",
        user.id,
        user.email
    );
    tracing::warn!("Change the password after first login.");

    Ok(user.id.as_i32())
}
