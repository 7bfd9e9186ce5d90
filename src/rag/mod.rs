//! Retrieval-augmented generation.
//!
//! This module provides:
//! - `RagService`: assembles the prompt for one chat turn from retrieved context
//! - `VectorStore`: the retrieval backend abstraction, with mock, Chroma and
//!   Astra implementations selected by configuration at startup

mod astra;
mod chroma;
mod dedup;
mod mock;
mod service;
mod store;

pub use astra::AstraStore;
pub use chroma::ChromaStore;
pub use dedup::Deduplicated;
pub use mock::MockVectorStore;
pub use service::{Citation, RagService};
pub use store::{RetrievalResult, VectorStore};

use std::sync::Arc;

use crate::core::config::{RetrievalConfig, StoreBackend};
use crate::core::errors::ApiError;

/// Build the configured retrieval backend, wrapped in content
/// deduplication unless that is disabled.
pub fn build_store(config: &RetrievalConfig) -> Result<Arc<dyn VectorStore>, ApiError> {
    fn wrap(store: impl VectorStore + 'static, dedupe: bool) -> Arc<dyn VectorStore> {
        if dedupe {
            Arc::new(Deduplicated::new(store))
        } else {
            Arc::new(store)
        }
    }

    let store = match config.backend {
        StoreBackend::Mock => wrap(MockVectorStore::new(), config.dedupe),
        StoreBackend::Chroma => wrap(ChromaStore::new(&config.chroma), config.dedupe),
        StoreBackend::Astra => wrap(AstraStore::new(&config.astra)?, config.dedupe),
    };

    Ok(store)
}
