//! Chatbot proxy route handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use wastecare_core::UserId;

use crate::services::ChatService;
use crate::state::AppState;

/// Chat request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "userId")]
    pub user_id: Option<i32>,
}

/// Chat reply body.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Forward one message to the completion service and relay the reply.
///
/// POST /api/chat
///
/// Always answers 200: an empty message gets a prompt-for-message reply and
/// an upstream failure gets a fixed fallback string.
#[instrument(skip(state, req), fields(user_id = ?req.user_id))]
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatReply> {
    let service = ChatService::new(state.pool(), state.completions());
    let reply = service
        .handle(req.user_id.map(UserId::new), &req.message)
        .await;

    Json(ChatReply { reply })
}
