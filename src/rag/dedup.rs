//! Content-level deduplication decorator.
//!
//! Vector databases can hold the same passage under several ids (re-ingested
//! files, overlapping chunk windows), and near-duplicate rows waste prompt
//! space. Wrapping a backend in [`Deduplicated`] drops repeated contents
//! before they reach the prompt builder, keeping the first (best-ranked)
//! occurrence and capping the output at `top_k`.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::core::errors::ApiError;

use super::store::{RetrievalResult, VectorStore};

pub struct Deduplicated<S> {
    inner: S,
}

impl<S> Deduplicated<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: VectorStore> VectorStore for Deduplicated<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn query(&self, query: &str, top_k: usize) -> Result<Vec<RetrievalResult>, ApiError> {
        let results = self.inner.query(query, top_k).await?;

        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(results.len());
        for result in results {
            if seen.insert(result.content.clone()) {
                unique.push(result);
            }
        }
        unique.truncate(top_k);

        Ok(unique)
    }
}
