//! Chat-completion API integration.
//!
//! The chatbot is a thin pass-through to a hosted completion service: one
//! user message in, one reply out. Handlers depend on the
//! [`CompletionClient`] capability so tests can substitute the network
//! client.

mod client;
mod error;
mod types;

pub use client::OpenAiClient;
pub use error::{ApiErrorResponse, CompletionError};
pub use types::{ApiMessage, CompletionRequest, CompletionResponse};

use async_trait::async_trait;

/// Capability interface for the hosted completion service.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one user message under a fixed system prompt, returning the
    /// assistant's reply text.
    async fn complete(&self, system: &str, message: &str) -> Result<String, CompletionError>;
}
