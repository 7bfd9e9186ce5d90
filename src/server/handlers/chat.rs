use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::Form;
use serde::Deserialize;
use uuid::Uuid;

use crate::core::errors::ApiError;
use crate::history::DEFAULT_SESSION;
use crate::llm::GenerationRequest;
use crate::server::views;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    pub message: String,
}

/// Serve the chat shell with the current history rendered in.
pub async fn chat_page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let history = state.history.snapshot(DEFAULT_SESSION).await;
    Html(views::chat_page(&history))
}

/// One chat turn: retrieve context, generate a reply, record the turn,
/// return the bot-message fragment.
///
/// A retrieval failure fails the request. A generation failure does not:
/// the user gets an apology reply and the turn is still recorded.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ChatForm>,
) -> Result<impl IntoResponse, ApiError> {
    let history = state
        .history
        .recent(DEFAULT_SESSION, state.config.chat.history_window)
        .await;

    let (messages, citations) = state
        .rag
        .prepare_messages_with_sources(
            &state.config.chat.system_prompt,
            &history,
            &form.message,
            state.config.retrieval.top_k,
        )
        .await?;

    let request = GenerationRequest::from_config(messages, &state.config.llm);
    let reply = match state.llm.chat(request).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::error!("{} completion failed: {}", state.llm.name(), err);
            format!("I'm sorry, but I encountered an error: {}", err)
        }
    };

    state
        .history
        .append_turn(DEFAULT_SESSION, form.message, reply.clone())
        .await;

    let message_id = Uuid::new_v4().to_string();
    Ok(Html(views::bot_message_fragment(
        &reply,
        &citations,
        &message_id,
    )))
}
