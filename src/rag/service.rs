//! Retrieval-augmentation orchestrator.
//!
//! Fetches passages relevant to the current user message, folds them into
//! the system prompt, and assembles the ordered message sequence for the
//! generation call. Retrieval stays separate from generation: this module
//! never contacts the language model.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::core::errors::ApiError;
use crate::llm::ChatMessage;

use super::store::VectorStore;

/// A (source, content) pair justifying part of a generated answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Citation {
    pub source: String,
    pub content: String,
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Truncate content for display
        let content: String = self.content.chars().take(50).collect();
        write!(f, "{}: {}...", self.source, content)
    }
}

pub struct RagService {
    store: Arc<dyn VectorStore>,
}

impl RagService {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    /// Fetch passages for `query` and fold them into one context string.
    ///
    /// The context keeps every passage in store order, newline-joined.
    /// Citations come from the same result list, deduplicated by content
    /// (first occurrence wins) and capped at `top_k`.
    ///
    /// A store failure propagates. There is no safe default context to
    /// substitute, so the whole turn fails rather than silently degrading
    /// to a no-context answer.
    pub async fn get_relevant_context(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<(String, Vec<Citation>), ApiError> {
        let results = match self.store.query(query, top_k).await {
            Ok(results) => results,
            Err(err) => {
                tracing::error!("vector store '{}' query failed: {}", self.store.name(), err);
                return Err(err);
            }
        };

        tracing::debug!(
            "retrieved {} passages from '{}'",
            results.len(),
            self.store.name()
        );

        let context = results
            .iter()
            .map(|r| r.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let mut seen = HashSet::new();
        let mut citations = Vec::new();
        for result in &results {
            if citations.len() == top_k {
                break;
            }
            if seen.insert(result.content.as_str()) {
                citations.push(Citation {
                    source: result.source.clone(),
                    content: result.content.clone(),
                });
            }
        }

        Ok((context, citations))
    }

    /// Assemble the full message sequence for one chat turn.
    ///
    /// The sequence is always: one system message (the prompt plus the
    /// retrieved context), the given history unchanged and in order,
    /// then one user message with the raw input. History trimming is the
    /// caller's job; this method sends along whatever it is given.
    pub async fn prepare_messages_with_sources(
        &self,
        system_prompt: &str,
        chat_history: &[ChatMessage],
        user_message: &str,
        top_k: usize,
    ) -> Result<(Vec<ChatMessage>, Vec<Citation>), ApiError> {
        let (context, citations) = self.get_relevant_context(user_message, top_k).await?;

        let mut messages = Vec::with_capacity(chat_history.len() + 2);
        messages.push(ChatMessage::system(format!(
            "{}\n\nRelevant context: {}",
            system_prompt, context
        )));
        messages.extend_from_slice(chat_history);
        messages.push(ChatMessage::user(user_message));

        Ok((messages, citations))
    }
}
