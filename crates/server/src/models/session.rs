//! Session-related types for authentication.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use wastecare_core::{Email, UserId, UserRole};

/// Session-stored identity.
///
/// Minimal data stored in the session to identify the logged-in account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Account's database ID.
    pub id: UserId,
    /// Account's display name.
    pub name: String,
    /// Account's email address.
    pub email: Email,
    /// Account's permission level.
    pub role: UserRole,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in account.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the Google OAuth CSRF state nonce.
    pub const OAUTH_STATE: &str = "oauth_state";
}
