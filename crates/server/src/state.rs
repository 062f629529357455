//! Application state shared across handlers.

use std::sync::Arc;

use lettre::transport::smtp::Error as SmtpError;
use sqlx::PgPool;

use crate::completions::{CompletionClient, OpenAiClient};
use crate::config::Config;
use crate::google::{AccountDirectory, GoogleDirectory};
use crate::services::email::{LogMailer, Mailer, SmtpMailer};

/// Application state shared across all handlers.
///
/// The outbound integrations are held as capability trait objects so handlers
/// never name a concrete third-party client; tests swap them for stubs.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    pool: PgPool,
    mailer: Arc<dyn Mailer>,
    completions: Arc<dyn CompletionClient>,
    directory: Option<Arc<dyn AccountDirectory>>,
}

impl AppState {
    /// Build state with the production clients derived from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP relay cannot be configured.
    pub fn new(config: Config, pool: PgPool) -> Result<Self, SmtpError> {
        let mailer: Arc<dyn Mailer> = match &config.smtp {
            Some(smtp) => Arc::new(SmtpMailer::new(smtp)?),
            None => {
                tracing::warn!("SMTP not configured - one-time codes will be logged, not sent");
                Arc::new(LogMailer)
            }
        };

        let completions: Arc<dyn CompletionClient> = Arc::new(OpenAiClient::new(&config.completions));

        let directory: Option<Arc<dyn AccountDirectory>> = config
            .google
            .as_ref()
            .map(|google| {
                Arc::new(GoogleDirectory::new(google, &config.base_url)) as Arc<dyn AccountDirectory>
            });
        if directory.is_none() {
            tracing::warn!("Google OAuth not configured - /auth/google is disabled");
        }

        Ok(Self::with_parts(config, pool, mailer, completions, directory))
    }

    /// Build state from explicit parts. Used by tests to inject stubs.
    #[must_use]
    pub fn with_parts(
        config: Config,
        pool: PgPool,
        mailer: Arc<dyn Mailer>,
        completions: Arc<dyn CompletionClient>,
        directory: Option<Arc<dyn AccountDirectory>>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                mailer,
                completions,
                directory,
            }),
        }
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// The database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// The outbound code mailer.
    #[must_use]
    pub fn mailer(&self) -> &dyn Mailer {
        self.inner.mailer.as_ref()
    }

    /// The chat-completion client.
    #[must_use]
    pub fn completions(&self) -> &dyn CompletionClient {
        self.inner.completions.as_ref()
    }

    /// The federated sign-in directory, when configured.
    #[must_use]
    pub fn directory(&self) -> Option<&dyn AccountDirectory> {
        self.inner.directory.as_deref()
    }
}
