//! In-process mock backend for development and tests.
//!
//! Serves random lorem-ipsum passages with random scores, so the rest
//! of the pipeline can run without any external vector database.

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::time::Duration;

use crate::core::errors::ApiError;

use super::store::{RetrievalResult, VectorStore};

const SENTENCES: &[&str] = &[
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
    "Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.",
    "Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris.",
    "Duis aute irure dolor in reprehenderit in voluptate velit esse cillum.",
    "Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia.",
    "Nisi ut aliquip ex ea commodo consequat.",
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod.",
    "Tempor incididunt ut labore et dolore magna aliqua.",
    "Ut enim ad minim veniam, quis nostrud exercitation ullamco.",
    "Laboris nisi ut aliquip ex ea commodo consequat.",
];

#[derive(Debug, Default, Clone)]
pub struct MockVectorStore;

impl MockVectorStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VectorStore for MockVectorStore {
    fn name(&self) -> &str {
        "mock"
    }

    async fn query(&self, _query: &str, top_k: usize) -> Result<Vec<RetrievalResult>, ApiError> {
        // simulate database latency
        tokio::time::sleep(Duration::from_millis(100)).await;

        let mut rng = rand::rng();
        let count = top_k.min(SENTENCES.len());

        let results = SENTENCES
            .choose_multiple(&mut rng, count)
            .enumerate()
            .map(|(i, sentence)| {
                let score: f32 = rng.random_range(0.5..1.0);
                RetrievalResult {
                    content: (*sentence).to_string(),
                    source: format!("mock_document_{}.txt", i + 1),
                    score: (score * 100.0).round() / 100.0,
                }
            })
            .collect();

        Ok(results)
    }
}
