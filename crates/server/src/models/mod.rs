//! Domain models.
//!
//! Validated domain objects, separate from the database row types in
//! [`crate::db`].

pub mod chat;
pub mod contact;
pub mod otp;
pub mod session;
pub mod user;

pub use chat::ChatMessage;
pub use contact::{ContactMessage, NewContactMessage, Notification};
pub use otp::{OTP_TTL, OtpRecord};
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
