//! Email delivery for one-time codes.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates. Handlers
//! depend on the [`Mailer`] capability rather than the SMTP client so tests
//! and SMTP-less deployments can substitute it.

use askama::Template;
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use wastecare_core::OtpPurpose;

use crate::config::SmtpConfig;

/// HTML template for the one-time code email.
#[derive(Template)]
#[template(path = "email/otp_code.html")]
struct OtpCodeEmailHtml<'a> {
    code: &'a str,
    action: &'a str,
}

/// Plain text template for the one-time code email.
#[derive(Template)]
#[template(path = "email/otp_code.txt")]
struct OtpCodeEmailText<'a> {
    code: &'a str,
    action: &'a str,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Capability interface for outbound one-time code delivery.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a one-time code to `to`.
    async fn send_otp_code(&self, to: &str, code: &str, purpose: OtpPurpose)
    -> Result<(), EmailError>;
}

/// Subject line for a code email.
fn subject_for(purpose: OtpPurpose) -> &'static str {
    match purpose {
        OtpPurpose::Register => "Verify your WasteCare account",
        OtpPurpose::Forgot => "Reset your WasteCare password",
    }
}

/// What the code authorizes, for the email body.
fn action_for(purpose: OtpPurpose) -> &'static str {
    match purpose {
        OtpPurpose::Register => "verify your email address",
        OtpPurpose::Forgot => "reset your password",
    }
}

/// SMTP-backed [`Mailer`].
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    /// Create a new SMTP mailer from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &SmtpConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_otp_code(
        &self,
        to: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), EmailError> {
        let action = action_for(purpose);
        let html = OtpCodeEmailHtml { code, action }.render()?;
        let text = OtpCodeEmailText { code, action }.render()?;

        self.send_multipart_email(to, subject_for(purpose), &text, &html)
            .await
    }
}

/// [`Mailer`] for deployments without SMTP: logs the code instead of sending
/// it, so local development can complete the flows.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_otp_code(
        &self,
        to: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), EmailError> {
        tracing::warn!(
            to = %to,
            code = %code,
            purpose = %purpose,
            "SMTP not configured - one-time code logged (dev mode)"
        );
        Ok(())
    }
}
