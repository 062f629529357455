//! Google OAuth integration.
//!
//! The platform delegates federated sign-in entirely to Google: we redirect
//! to the consent screen, exchange the returned code for an access token and
//! read the profile. Handlers depend on the [`AccountDirectory`] capability
//! so tests can substitute the network client.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::GoogleConfig;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const SCOPES: &str = "openid email profile";

/// Errors that can occur talking to the directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the exchange.
    #[error("token exchange failed: {0}")]
    Exchange(String),

    /// The profile is missing a required field.
    #[error("profile missing field: {0}")]
    IncompleteProfile(&'static str),
}

/// A federated identity as reported by the directory.
#[derive(Debug, Clone)]
pub struct DirectoryProfile {
    /// The provider's stable subject identifier.
    pub subject: String,
    /// Verified email address.
    pub email: String,
    /// Display name.
    pub name: String,
}

/// Capability interface for federated sign-in.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// The consent-screen URL to redirect the browser to.
    fn authorize_url(&self, state: &str) -> String;

    /// Exchange an authorization code for the account's profile.
    async fn exchange_code(&self, code: &str) -> Result<DirectoryProfile, DirectoryError>;
}

/// Google-backed [`AccountDirectory`].
#[derive(Clone)]
pub struct GoogleDirectory {
    inner: Arc<GoogleDirectoryInner>,
}

struct GoogleDirectoryInner {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Userinfo endpoint response.
#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl GoogleDirectory {
    /// Create a new Google directory client.
    ///
    /// `base_url` is the deployment's public URL; the OAuth redirect URI is
    /// derived from it and must match the client's registered URI.
    #[must_use]
    pub fn new(config: &GoogleConfig, base_url: &str) -> Self {
        let redirect_uri = format!("{}/auth/google/callback", base_url.trim_end_matches('/'));

        Self {
            inner: Arc::new(GoogleDirectoryInner {
                client: reqwest::Client::new(),
                client_id: config.client_id.clone(),
                client_secret: config.client_secret.expose_secret().to_string(),
                redirect_uri,
            }),
        }
    }
}

#[async_trait]
impl AccountDirectory for GoogleDirectory {
    fn authorize_url(&self, state: &str) -> String {
        // AUTHORIZE_URL is a valid static URL; parsing cannot fail.
        let mut url = Url::parse(AUTHORIZE_URL).expect("valid authorize URL");
        url.query_pairs_mut()
            .append_pair("client_id", &self.inner.client_id)
            .append_pair("redirect_uri", &self.inner.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", SCOPES)
            .append_pair("state", state);
        url.into()
    }

    async fn exchange_code(&self, code: &str) -> Result<DirectoryProfile, DirectoryError> {
        let token_response = self
            .inner
            .client
            .post(TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", &self.inner.client_id),
                ("client_secret", &self.inner.client_secret),
                ("redirect_uri", &self.inner.redirect_uri),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        if !token_response.status().is_success() {
            let body = token_response.text().await.unwrap_or_default();
            return Err(DirectoryError::Exchange(body));
        }

        let token: TokenResponse = token_response
            .json()
            .await
            .map_err(DirectoryError::Http)?;

        let profile: UserInfoResponse = self
            .inner
            .client
            .get(USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let email = profile
            .email
            .ok_or(DirectoryError::IncompleteProfile("email"))?;
        let name = profile.name.unwrap_or_else(|| email.clone());

        Ok(DirectoryProfile {
            subject: profile.sub,
            email,
            name,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn directory() -> GoogleDirectory {
        GoogleDirectory::new(
            &GoogleConfig {
                client_id: "client-123.apps.googleusercontent.com".to_string(),
                client_secret: SecretString::from("GOCSPX-abc"),
            },
            "https://wastecare.example/",
        )
    }

    #[test]
    fn test_authorize_url_carries_oauth_params() {
        let url = directory().authorize_url("state-nonce");
        let parsed = Url::parse(&url).unwrap();

        assert_eq!(parsed.host_str(), Some("accounts.google.com"));

        let pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(pairs.contains(&(
            "client_id".to_string(),
            "client-123.apps.googleusercontent.com".to_string()
        )));
        assert!(pairs.contains(&(
            "redirect_uri".to_string(),
            "https://wastecare.example/auth/google/callback".to_string()
        )));
        assert!(pairs.contains(&("response_type".to_string(), "code".to_string())));
        assert!(pairs.contains(&("scope".to_string(), SCOPES.to_string())));
        assert!(pairs.contains(&("state".to_string(), "state-nonce".to_string())));
    }

    #[test]
    fn test_userinfo_response_parses() {
        let body = r#"{"sub": "10987", "email": "person@example.com", "name": "A Person"}"#;
        let parsed: UserInfoResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.sub, "10987");
        assert_eq!(parsed.email.as_deref(), Some("person@example.com"));
    }

    #[test]
    fn test_userinfo_without_name_is_accepted() {
        let body = r#"{"sub": "10987", "email": "person@example.com"}"#;
        let parsed: UserInfoResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.name.is_none());
    }
}
