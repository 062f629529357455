//! Integration tests for WasteCare.
//!
//! # Running Tests
//!
//! ```bash
//! # Run migrations and start the server (SMTP unset so codes are logged)
//! cargo run -p wastecare-cli -- migrate
//! cargo run -p wastecare-server
//!
//! # Run integration tests
//! cargo test -p wastecare-integration-tests -- --ignored
//! ```
//!
//! Every test is `#[ignore]`d because it needs a running server and
//! database. The base URL is configurable via `WASTECARE_BASE_URL`
//! (default: `http://localhost:5000`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("WASTECARE_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// Create a client with a cookie store, so sessions persist across requests.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A random email address that won't collide across test runs.
#[must_use]
pub fn random_email(prefix: &str) -> String {
    format!("{prefix}-{}@integration.test", uuid::Uuid::new_v4())
}
