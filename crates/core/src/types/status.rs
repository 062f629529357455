//! Role and lifecycle enums.
//!
//! All enums serialize as `snake_case` strings and round-trip through
//! `Display`/`FromStr`, which is how repository row types and the CLI parse
//! the text columns they are stored in.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a stored enum value cannot be parsed.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct ParseStatusError {
    kind: &'static str,
    value: String,
}

impl ParseStatusError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// The authentication origin of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// Email + password credentials held locally.
    #[default]
    Local,
    /// Federated Google OAuth account (no local password).
    Google,
}

impl Provider {
    /// The stable string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Google => "google",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "google" => Ok(Self::Google),
            other => Err(ParseStatusError::new("provider", other)),
        }
    }
}

/// Account permission level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// A resident using the service.
    #[default]
    Client,
    /// Staff with access to the admin dashboard.
    Admin,
}

impl UserRole {
    /// The stable string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Self::Client),
            "admin" => Ok(Self::Admin),
            other => Err(ParseStatusError::new("user role", other)),
        }
    }
}

/// What a one-time code authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    /// Email verification completing a new registration.
    Register,
    /// Password reset for an existing local account.
    Forgot,
}

impl OtpPurpose {
    /// The stable string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Forgot => "forgot",
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OtpPurpose {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "register" => Ok(Self::Register),
            "forgot" => Ok(Self::Forgot),
            other => Err(ParseStatusError::new("otp purpose", other)),
        }
    }
}

/// Lifecycle of a contact-form message in the admin inbox.
///
/// Transitions only move forward: `new → read`, `new|read → replied`.
/// `replied` is terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    /// Just submitted, not yet seen by staff.
    #[default]
    New,
    /// Seen by staff.
    Read,
    /// Staff has responded. Terminal.
    Replied,
}

impl MessageStatus {
    /// The stable string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
        }
    }

    /// Whether a transition to `target` moves the lifecycle forward.
    ///
    /// Same-state "transitions" are not forward moves; callers treat them as
    /// idempotent no-ops rather than errors.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        target > self
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "read" => Ok(Self::Read),
            "replied" => Ok(Self::Replied),
            other => Err(ParseStatusError::new("message status", other)),
        }
    }
}

/// Role of a line in the chatbot transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    /// A visitor's message.
    User,
    /// The assistant's reply.
    Assistant,
    /// The fixed system prompt.
    System,
}

impl ChatRole {
    /// The stable string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatRole {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            "system" => Ok(Self::System),
            other => Err(ParseStatusError::new("chat role", other)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_through_str() {
        for role in [UserRole::Client, UserRole::Admin] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        for provider in [Provider::Local, Provider::Google] {
            assert_eq!(provider.as_str().parse::<Provider>().unwrap(), provider);
        }
        for purpose in [OtpPurpose::Register, OtpPurpose::Forgot] {
            assert_eq!(purpose.as_str().parse::<OtpPurpose>().unwrap(), purpose);
        }
        for status in [
            MessageStatus::New,
            MessageStatus::Read,
            MessageStatus::Replied,
        ] {
            assert_eq!(status.as_str().parse::<MessageStatus>().unwrap(), status);
        }
        for role in [ChatRole::User, ChatRole::Assistant, ChatRole::System] {
            assert_eq!(role.as_str().parse::<ChatRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_value_rejected() {
        assert!("superuser".parse::<UserRole>().is_err());
        assert!("archived".parse::<MessageStatus>().is_err());
    }

    #[test]
    fn test_status_moves_forward_only() {
        use MessageStatus::{New, Read, Replied};

        assert!(New.can_transition_to(Read));
        assert!(New.can_transition_to(Replied));
        assert!(Read.can_transition_to(Replied));

        // Never backward, never self.
        assert!(!Read.can_transition_to(New));
        assert!(!Replied.can_transition_to(Read));
        assert!(!Replied.can_transition_to(New));
        assert!(!Read.can_transition_to(Read));
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&MessageStatus::Replied).unwrap(),
            "\"replied\""
        );
        assert_eq!(
            serde_json::from_str::<ChatRole>("\"assistant\"").unwrap(),
            ChatRole::Assistant
        );
    }
}
