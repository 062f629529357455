//! Business logic services.
//!
//! # Services
//!
//! - `auth` - OTP-verified registration, login, password reset
//! - `chat` - Chatbot proxy orchestration
//! - `email` - One-time code delivery via SMTP

pub mod auth;
pub mod chat;
pub mod email;

pub use auth::{AuthError, AuthService, generate_otp_code, hash_password};
pub use chat::ChatService;
pub use email::{EmailError, LogMailer, Mailer, SmtpMailer};
