//! One-time code repository.
//!
//! The persisted, indexed replacement for the original deployment's
//! process-lifetime OTP map: codes survive restarts and are visible to every
//! instance. Validity is enforced by the `expires_at > now()` predicate on
//! lookup; stale rows are swept opportunistically on each insert.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use wastecare_core::{Email, OtpId, OtpPurpose};

use super::RepositoryError;
use crate::models::OtpRecord;

const OTP_COLUMNS: &str = "id, email, code, purpose, name, password_hash, expires_at, created_at";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for OTP queries.
#[derive(Debug, sqlx::FromRow)]
struct OtpRow {
    id: OtpId,
    email: String,
    code: String,
    purpose: String,
    name: Option<String>,
    password_hash: Option<String>,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TryFrom<OtpRow> for OtpRecord {
    type Error = RepositoryError;

    fn try_from(row: OtpRow) -> Result<Self, Self::Error> {
        let purpose: OtpPurpose = row.purpose.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid otp purpose in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            email: row.email,
            code: row.code,
            purpose,
            name: row.name,
            password_hash: row.password_hash,
            expires_at: row.expires_at,
            created_at: row.created_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for one-time code database operations.
pub struct OtpRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OtpRepository<'a> {
    /// Create a new OTP repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a freshly issued code.
    ///
    /// Earlier codes for the same email and purpose are superseded (deleted)
    /// so only the latest one can verify; expired rows from any email are
    /// swept at the same time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn create(
        &self,
        email: &Email,
        code: &str,
        purpose: OtpPurpose,
        name: Option<&str>,
        password_hash: Option<&str>,
        expires_at: DateTime<Utc>,
    ) -> Result<OtpRecord, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM wastecare.otp WHERE expires_at <= now()")
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM wastecare.otp WHERE email = $1 AND purpose = $2")
            .bind(email.as_str())
            .bind(purpose.as_str())
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, OtpRow>(&format!(
            "INSERT INTO wastecare.otp (email, code, purpose, name, password_hash, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {OTP_COLUMNS}"
        ))
        .bind(email.as_str())
        .bind(code)
        .bind(purpose.as_str())
        .bind(name)
        .bind(password_hash)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        row.try_into()
    }

    /// Find an unexpired code matching email + code + purpose exactly.
    ///
    /// Expired and absent codes are indistinguishable to the caller, which is
    /// what the API reports ("invalid or expired").
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn find_valid(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, OtpRow>(&format!(
            "SELECT {OTP_COLUMNS} FROM wastecare.otp \
             WHERE email = $1 AND code = $2 AND purpose = $3 AND expires_at > now()"
        ))
        .bind(email)
        .bind(code)
        .bind(purpose.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Delete every code for an email. Called after successful verification
    /// so a code can never be replayed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn consume(&self, email: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM wastecare.otp WHERE email = $1")
            .bind(email)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
