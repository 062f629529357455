//! One-time code domain types.

use chrono::{DateTime, Duration, Utc};

use wastecare_core::{OtpId, OtpPurpose};

/// How long a one-time code stays valid after issue.
pub const OTP_TTL: Duration = Duration::minutes(5);

/// A stored one-time code.
///
/// Registration codes carry the pending account's name and password hash so
/// verification needs nothing but the email and code. The store is the
/// database, not process memory, so codes survive restarts and are shared
/// across instances.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    /// Unique record ID.
    pub id: OtpId,
    /// Email the code was sent to (stored lowercase).
    pub email: String,
    /// The 6-digit code.
    pub code: String,
    /// What the code authorizes.
    pub purpose: OtpPurpose,
    /// Pending display name (registration codes only).
    pub name: Option<String>,
    /// Pending password hash (registration codes only).
    pub password_hash: Option<String>,
    /// Instant after which the code is no longer accepted.
    pub expires_at: DateTime<Utc>,
    /// When the code was issued.
    pub created_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Whether the code is still within its validity window at `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
