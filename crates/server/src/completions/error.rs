//! Error types for the chat-completions API.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when calling the completion service.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited; retry after the given number of seconds.
    #[error("rate limited, retry after {0}s")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The API returned a structured error.
    #[error("API error ({error_type}): {message}")]
    Api {
        /// Error type reported by the API.
        error_type: String,
        /// Human-readable message.
        message: String,
    },

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response carried no reply.
    #[error("response contained no choices")]
    EmptyResponse,
}

/// Error response body from the API.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    /// The error payload.
    pub error: ApiErrorDetail,
}

/// Inner error payload.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    /// Error type (e.g., "invalid_request_error").
    #[serde(rename = "type", default)]
    pub error_type: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}
