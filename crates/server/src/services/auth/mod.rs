//! Account authentication service.
//!
//! Orchestrates the OTP-verified registration flow, password login for
//! clients and admins, and the OTP-verified password reset. Every login
//! failure shape collapses into the same `InvalidCredentials` so responses
//! cannot reveal whether an account exists.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sqlx::PgPool;

use wastecare_core::{Email, OtpPurpose, UserRole};

use crate::db::{OtpRepository, UserRepository};
use crate::models::{OTP_TTL, User};
use crate::services::email::Mailer;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    otps: OtpRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
            otps: OtpRepository::new(pool),
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Start a registration: issue and email a one-time code.
    ///
    /// The pending account (name + password hash) rides along on the stored
    /// code, so verification needs only the email and code.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::AccountExists` if the email is already registered —
    /// in that case no code is stored or sent.
    pub async fn request_registration_otp(
        &self,
        mailer: &dyn Mailer,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        if self.users.exists_by_email(email.as_str()).await? {
            return Err(AuthError::AccountExists);
        }

        let password_hash = hash_password(password)?;
        let code = generate_otp_code();
        let expires_at = Utc::now() + OTP_TTL;

        self.otps
            .create(
                &email,
                &code,
                OtpPurpose::Register,
                Some(name),
                Some(&password_hash),
                expires_at,
            )
            .await?;

        mailer
            .send_otp_code(email.as_str(), &code, OtpPurpose::Register)
            .await?;

        Ok(())
    }

    /// Complete a registration: verify the code and create the account.
    ///
    /// The code is single-use — every code for the email is consumed on
    /// success.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidOtp` for a wrong, expired, or unknown code.
    /// Returns `AuthError::AccountExists` if an account appeared for the
    /// email since the code was issued.
    pub async fn verify_registration_otp(
        &self,
        email: &str,
        code: &str,
    ) -> Result<User, AuthError> {
        let record = self
            .otps
            .find_valid(email, code, OtpPurpose::Register)
            .await?
            .ok_or(AuthError::InvalidOtp)?;

        // A registration code without its pending payload cannot complete.
        let (name, password_hash) = match (record.name, record.password_hash) {
            (Some(name), Some(hash)) => (name, hash),
            _ => return Err(AuthError::InvalidOtp),
        };

        let parsed = Email::parse(&record.email)?;
        let user = self
            .users
            .create_local(&parsed, &name, &password_hash, UserRole::Client, true)
            .await
            .map_err(|e| match e {
                crate::db::RepositoryError::Conflict(_) => AuthError::AccountExists,
                other => AuthError::Repository(other),
            })?;

        self.otps.consume(email).await?;

        Ok(user)
    }

    // =========================================================================
    // Login
    // =========================================================================

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for every mismatch shape.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let (user, password_hash) = self
            .users
            .get_local_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // OAuth-converted or half-created accounts have no hash to compare.
        let password_hash = password_hash.ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Login restricted to admin accounts.
    ///
    /// A valid client credential against this entry point fails exactly like
    /// a bad password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for every mismatch shape.
    pub async fn admin_login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self.login(email, password).await?;

        if user.role != UserRole::Admin {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    // =========================================================================
    // Password Reset
    // =========================================================================

    /// Start a password reset: issue and email a one-time code.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UnknownAccount` if no local account matches.
    pub async fn request_reset_otp(
        &self,
        mailer: &dyn Mailer,
        email: &str,
    ) -> Result<(), AuthError> {
        let email = Email::parse(email)?;

        if self
            .users
            .get_local_by_email(email.as_str())
            .await?
            .is_none()
        {
            return Err(AuthError::UnknownAccount);
        }

        let code = generate_otp_code();
        let expires_at = Utc::now() + OTP_TTL;

        self.otps
            .create(&email, &code, OtpPurpose::Forgot, None, None, expires_at)
            .await?;

        mailer
            .send_otp_code(email.as_str(), &code, OtpPurpose::Forgot)
            .await?;

        Ok(())
    }

    /// Complete a password reset: verify the code and store the new hash.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidOtp` for a wrong, expired, or unknown code.
    /// Returns `AuthError::WeakPassword` if the replacement is too weak.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        validate_password(new_password)?;

        self.otps
            .find_valid(email, code, OtpPurpose::Forgot)
            .await?
            .ok_or(AuthError::InvalidOtp)?;

        let password_hash = hash_password(new_password)?;
        self.users.update_password(email, &password_hash).await?;
        self.otps.consume(email).await?;

        Ok(())
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Generate a 6-digit one-time code.
#[must_use]
pub fn generate_otp_code() -> String {
    use rand::Rng;
    let code: u32 = rand::rng().random_range(100_000..1_000_000);
    code.to_string()
}

/// Validate password requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_otp_code_format() {
        let code = generate_otp_code();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_otp_code_range() {
        for _ in 0..100 {
            let code: u32 = generate_otp_code().parse().expect("valid number");
            assert!(code >= 100_000);
            assert!(code < 1_000_000);
        }
    }

    #[test]
    fn test_validate_password_too_short() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_validate_password_ok() {
        assert!(validate_password("long enough password").is_ok());
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password!", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password!").unwrap();
        let b = hash_password("same password!").unwrap();
        assert_ne!(a, b);
    }
}
