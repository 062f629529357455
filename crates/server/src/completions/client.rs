//! HTTP client for the hosted chat-completions API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::CompletionConfig;

use super::CompletionClient;
use super::error::{ApiErrorResponse, CompletionError};
use super::types::{ApiMessage, CompletionRequest, CompletionResponse};

const COMPLETIONS_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Chat-completions API client.
#[derive(Clone)]
pub struct OpenAiClient {
    inner: Arc<OpenAiClientInner>,
}

struct OpenAiClientInner {
    client: reqwest::Client,
    model: String,
}

impl OpenAiClient {
    /// Create a new completions client.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration containing key and model
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &CompletionConfig) -> Self {
        let api_key = config.api_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))
                .expect("Invalid API key for header"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(OpenAiClientInner {
                client,
                model: config.model.clone(),
            }),
        }
    }

    /// Handle a successful response.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<CompletionResponse, CompletionError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| CompletionError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(self.handle_error_status(status, response).await)
        }
    }

    /// Handle an error status code.
    async fn handle_error_status(
        &self,
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> CompletionError {
        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return CompletionError::RateLimited(retry_after);
        }

        // Check for unauthorized
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return CompletionError::Unauthorized("Invalid API key".to_string());
        }

        // Try to parse API error response
        match response.text().await {
            Ok(body) => {
                if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                    CompletionError::Api {
                        error_type: api_error.error.error_type,
                        message: api_error.error.message,
                    }
                } else {
                    CompletionError::Api {
                        error_type: "unknown".to_string(),
                        message: body,
                    }
                }
            }
            Err(e) => CompletionError::Http(e),
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    #[instrument(skip(self, system, message), fields(model = %self.inner.model))]
    async fn complete(&self, system: &str, message: &str) -> Result<String, CompletionError> {
        let request = CompletionRequest {
            model: self.inner.model.clone(),
            messages: vec![ApiMessage::system(system), ApiMessage::user(message)],
        };

        let response = self
            .inner
            .client
            .post(COMPLETIONS_API_URL)
            .json(&request)
            .send()
            .await?;

        let completion = self.handle_response(response).await?;

        completion
            .first_reply()
            .map(ToOwned::to_owned)
            .ok_or(CompletionError::EmptyResponse)
    }
}
