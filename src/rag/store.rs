//! VectorStore trait, the abstract interface for retrieval backends.
//!
//! Implementations search an external vector database (or an in-process
//! mock) by query text and return scored passages. Embedding happens on
//! the database side; this service never computes vectors itself.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;

/// One passage returned by a similarity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// The text content of the passage.
    pub content: String,
    /// Source identifier (filename, URL, document id).
    pub source: String,
    /// Similarity score (higher = better).
    pub score: f32,
}

/// Abstract trait for retrieval backends.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// return the backend name (e.g. "chroma", "astra", "mock")
    fn name(&self) -> &str;

    /// Search for passages relevant to the query text.
    ///
    /// Returns at most `top_k` results, best match first.
    async fn query(&self, query: &str, top_k: usize) -> Result<Vec<RetrievalResult>, ApiError>;
}
