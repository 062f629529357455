//! User account domain types.

use chrono::{DateTime, Utc};

use wastecare_core::{Email, Provider, UserId, UserRole};

/// A user account (domain type).
///
/// The password hash never leaves the repository layer; login flows receive
/// it side-by-side with the user rather than through this type.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique account ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Account email address (stored lowercase).
    pub email: Email,
    /// Where the account's credentials live.
    pub provider: Provider,
    /// Google subject identifier, for OAuth accounts.
    pub google_id: Option<String>,
    /// Permission level.
    pub role: UserRole,
    /// Whether the email address has been verified.
    pub is_verified: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}
