use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::history::DEFAULT_SESSION;
use crate::state::AppState;

/// Full history as `[{role, content}]` records.
pub async fn get_chat_history(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let messages = state.history.snapshot(DEFAULT_SESSION).await;
    Json(messages)
}

pub async fn clear_history(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.history.clear(DEFAULT_SESSION).await;
    Json(json!({ "message": "Chat history cleared" }))
}
