//! User account repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use wastecare_core::{Email, Provider, UserId, UserRole};

use super::RepositoryError;
use crate::models::User;

const USER_COLUMNS: &str = "id, name, email, password_hash, provider, google_id, role, \
                            is_verified, created_at, updated_at";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: UserId,
    name: String,
    email: String,
    password_hash: Option<String>,
    provider: String,
    google_id: Option<String>,
    role: String,
    is_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Split the row into the domain user and its password hash.
    ///
    /// The hash stays out of [`User`] so it cannot leak through serialization.
    fn into_parts(self) -> Result<(User, Option<String>), RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let provider: Provider = self.provider.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid provider in database: {e}"))
        })?;
        let role: UserRole = self.role.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
        })?;

        let user = User {
            id: self.id,
            name: self.name,
            email,
            provider,
            google_id: self.google_id,
            role,
            is_verified: self.is_verified,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };

        Ok((user, self.password_hash))
    }
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let (user, _) = row.into_parts()?;
        Ok(user)
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for user account database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Whether any account exists for the email, regardless of provider.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM wastecare.user_account WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Get an account by email, regardless of provider.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM wastecare.user_account WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a local-provider account by email, together with its password hash.
    ///
    /// OAuth accounts are not returned; they have no password to compare.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_local_by_email(
        &self,
        email: &str,
    ) -> Result<Option<(User, Option<String>)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM wastecare.user_account \
             WHERE email = $1 AND provider = 'local'"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_parts).transpose()
    }

    /// Create a local-provider account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_local(
        &self,
        email: &Email,
        name: &str,
        password_hash: &str,
        role: UserRole,
        is_verified: bool,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO wastecare.user_account \
                 (name, email, password_hash, provider, role, is_verified) \
             VALUES ($1, $2, $3, 'local', $4, $5) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(name)
        .bind(email.as_str())
        .bind(password_hash)
        .bind(role.as_str())
        .bind(is_verified)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "email already exists"))?;

        row.try_into()
    }

    /// Insert or update a Google-provider account for the email.
    ///
    /// An existing row keeps its role and gains the Google subject id; a new
    /// row is created verified, with no password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn upsert_google(
        &self,
        email: &Email,
        name: &str,
        google_id: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO wastecare.user_account \
                 (name, email, provider, google_id, role, is_verified) \
             VALUES ($1, $2, 'google', $3, 'client', TRUE) \
             ON CONFLICT (email) DO UPDATE \
                 SET google_id = EXCLUDED.google_id, is_verified = TRUE \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(name)
        .bind(email.as_str())
        .bind(google_id)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Replace the password hash of a local account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no local account matches.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE wastecare.user_account SET password_hash = $2 \
             WHERE email = $1 AND provider = 'local'",
        )
        .bind(email)
        .bind(password_hash)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
