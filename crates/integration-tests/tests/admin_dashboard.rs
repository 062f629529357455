//! Integration tests for the contact inbox and admin dashboard.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p wastecare-server)
//! - A seeded admin account, provided via `WASTECARE_ADMIN_EMAIL` /
//!   `WASTECARE_ADMIN_PASSWORD` (create one with
//!   `wastecare-cli admin create`)
//!
//! Run with: cargo test -p wastecare-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use wastecare_integration_tests::{base_url, client, random_email};

/// Seeded admin credentials, if configured.
fn admin_account() -> Option<(String, String)> {
    let email = std::env::var("WASTECARE_ADMIN_EMAIL").ok()?;
    let password = std::env::var("WASTECARE_ADMIN_PASSWORD").ok()?;
    Some((email, password))
}

/// Log in as the seeded admin and return the session-holding client.
async fn admin_client() -> Option<Client> {
    let (email, password) = admin_account()?;
    let client = client();

    let body: Value = client
        .post(format!("{}/api/admin/login", base_url()))
        .json(&json!({"email": email, "password": password}))
        .send()
        .await
        .expect("admin login request failed")
        .json()
        .await
        .expect("non-JSON response");

    assert_eq!(body["success"], true, "admin login failed: {body}");
    Some(client)
}

async fn list(client: &Client, path: &str) -> Vec<Value> {
    client
        .get(format!("{}{path}", base_url()))
        .send()
        .await
        .expect("list request failed")
        .json()
        .await
        .expect("non-array response")
}

// ============================================================================
// Access control
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running wastecare server and database"]
async fn test_admin_endpoints_require_session() {
    let anonymous = client();

    for path in [
        "/api/admin/messages",
        "/api/admin/notifications",
    ] {
        let resp = anonymous
            .get(format!("{}{path}", base_url()))
            .send()
            .await
            .expect("request failed");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{path}");
    }

    let resp = anonymous
        .post(format!("{}/api/admin/messages/1/read", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires a running wastecare server and database"]
async fn test_admin_login_rejects_bad_credentials() {
    let body: Value = client()
        .post(format!("{}/api/admin/login", base_url()))
        .json(&json!({"email": random_email("admin"), "password": "wrong password"}))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("non-JSON response");

    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid credentials");
}

// ============================================================================
// Contact form -> notification
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running wastecare server and database"]
async fn test_contact_rejects_missing_fields() {
    let body: Value = client()
        .post(format!("{}/api/contact", base_url()))
        .json(&json!({"name": "Ada", "email": "", "message": ""}))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("non-JSON response");

    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "All fields required");
}

#[tokio::test]
#[ignore = "Requires a running wastecare server and database"]
async fn test_contact_creates_exactly_one_notification() {
    let Some(admin) = admin_client().await else {
        eprintln!("WASTECARE_ADMIN_EMAIL not set - skipping");
        return;
    };

    let before = list(&admin, "/api/admin/messages").await.len();
    let notifications_before = list(&admin, "/api/admin/notifications").await;

    let sender = random_email("contact");
    let body: Value = client()
        .post(format!("{}/api/contact", base_url()))
        .json(&json!({
            "name": "Integration Resident",
            "email": sender,
            "subject": "Missed pickup",
            "message": "The truck skipped Elm Street today."
        }))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("non-JSON response");
    assert_eq!(body["success"], true);

    let after = list(&admin, "/api/admin/messages").await;
    assert_eq!(after.len(), before + 1);

    // Newest first; the fresh message leads with status "new".
    assert_eq!(after[0]["email"], sender);
    assert_eq!(after[0]["status"], "new");

    // Exactly one new notification, announcing the sender.
    let notifications_after = list(&admin, "/api/admin/notifications").await;
    let fresh: Vec<&Value> = notifications_after
        .iter()
        .filter(|n| !notifications_before.iter().any(|o| o["id"] == n["id"]))
        .collect();
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0]["title"], "New Contact Message");
    assert_eq!(fresh[0]["message"], "Integration Resident sent a message");
    assert_eq!(fresh[0]["is_read"], false);
}

// ============================================================================
// Status transitions
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running wastecare server and database"]
async fn test_message_status_never_reverts() {
    let Some(admin) = admin_client().await else {
        eprintln!("WASTECARE_ADMIN_EMAIL not set - skipping");
        return;
    };

    // Submit a fresh message to work on.
    let resp: Value = client()
        .post(format!("{}/api/contact", base_url()))
        .json(&json!({
            "name": "Status Tester",
            "email": random_email("status"),
            "message": "Bin replacement request."
        }))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("non-JSON response");
    assert_eq!(resp["success"], true);

    let messages = list(&admin, "/api/admin/messages").await;
    let id = messages[0]["id"].as_i64().expect("message id");

    // new -> read -> replied
    for action in ["read", "replied"] {
        let body: Value = admin
            .post(format!("{}/api/admin/messages/{id}/{action}", base_url()))
            .send()
            .await
            .expect("request failed")
            .json()
            .await
            .expect("non-JSON response");
        assert_eq!(body["success"], true);
    }

    // Marking read again must not revert the terminal state.
    let body: Value = admin
        .post(format!("{}/api/admin/messages/{id}/read", base_url()))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("non-JSON response");
    assert_eq!(body["success"], true);

    let messages = list(&admin, "/api/admin/messages").await;
    let message = messages
        .iter()
        .find(|m| m["id"].as_i64() == Some(id))
        .expect("message still listed");
    assert_eq!(message["status"], "replied");
}

#[tokio::test]
#[ignore = "Requires a running wastecare server and database"]
async fn test_unknown_message_transition_is_404() {
    let Some(admin) = admin_client().await else {
        eprintln!("WASTECARE_ADMIN_EMAIL not set - skipping");
        return;
    };

    let resp = admin
        .post(format!("{}/api/admin/messages/999999999/read", base_url()))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires a running wastecare server and database"]
async fn test_notification_mark_read() {
    let Some(admin) = admin_client().await else {
        eprintln!("WASTECARE_ADMIN_EMAIL not set - skipping");
        return;
    };

    // Ensure at least one notification exists.
    let _: Value = client()
        .post(format!("{}/api/contact", base_url()))
        .json(&json!({
            "name": "Notifier",
            "email": random_email("notify"),
            "message": "Broken bin lid."
        }))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("non-JSON response");

    let notifications = list(&admin, "/api/admin/notifications").await;
    let id = notifications[0]["id"].as_i64().expect("notification id");

    let body: Value = admin
        .post(format!(
            "{}/api/admin/notifications/{id}/read",
            base_url()
        ))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("non-JSON response");
    assert_eq!(body["success"], true);

    let notifications = list(&admin, "/api/admin/notifications").await;
    let notification = notifications
        .iter()
        .find(|n| n["id"].as_i64() == Some(id))
        .expect("notification still listed");
    assert_eq!(notification["is_read"], true);
}
