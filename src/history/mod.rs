//! In-memory chat history, one message log per session.
//!
//! Appends are serialized per session: a completed turn writes its user
//! and assistant entries under a single lock, so concurrent turns can
//! never interleave between the two halves of a turn or lose writes.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::llm::ChatMessage;

/// Session id used by the single-conversation HTTP surface.
pub const DEFAULT_SESSION: &str = "default";

type SessionLog = Arc<Mutex<Vec<ChatMessage>>>;

#[derive(Default)]
pub struct HistoryStore {
    sessions: RwLock<HashMap<String, SessionLog>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn session(&self, session_id: &str) -> SessionLog {
        {
            let sessions = self.sessions.read().await;
            if let Some(log) = sessions.get(session_id) {
                return log.clone();
            }
        }
        let mut sessions = self.sessions.write().await;
        sessions.entry(session_id.to_string()).or_default().clone()
    }

    /// Append one completed turn: the user message, then the assistant
    /// reply, under one lock.
    pub async fn append_turn(&self, session_id: &str, user: String, assistant: String) {
        let log = self.session(session_id).await;
        let mut log = log.lock().await;
        log.push(ChatMessage::user(user));
        log.push(ChatMessage::assistant(assistant));
    }

    /// The last `limit` messages in chronological order. `0` means all.
    pub async fn recent(&self, session_id: &str, limit: usize) -> Vec<ChatMessage> {
        let log = self.session(session_id).await;
        let log = log.lock().await;
        if limit == 0 || log.len() <= limit {
            log.clone()
        } else {
            log[log.len() - limit..].to_vec()
        }
    }

    /// The full message log in chronological order.
    pub async fn snapshot(&self, session_id: &str) -> Vec<ChatMessage> {
        let log = self.session(session_id).await;
        let log = log.lock().await;
        log.clone()
    }

    pub async fn clear(&self, session_id: &str) {
        let log = self.session(session_id).await;
        log.lock().await.clear();
    }

    pub async fn len(&self, session_id: &str) -> usize {
        let log = self.session(session_id).await;
        let log = log.lock().await;
        log.len()
    }
}
