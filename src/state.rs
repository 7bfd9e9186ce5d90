use std::sync::Arc;

use crate::core::config::AppConfig;
use crate::core::errors::ApiError;
use crate::history::HistoryStore;
use crate::llm::{LlmProvider, OpenAiProvider};
use crate::rag::{build_store, RagService, VectorStore};

/// Global application state shared across all routes.
///
/// Contains references to:
/// - Configuration
/// - The per-session chat history
/// - The retrieval orchestrator and its vector store backend
/// - The language-model provider
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub history: Arc<HistoryStore>,
    pub rag: Arc<RagService>,
    pub llm: Arc<dyn LlmProvider>,
}

impl AppState {
    /// Wire up the production capabilities from a loaded configuration.
    pub fn new(config: AppConfig) -> Result<Arc<Self>, ApiError> {
        let api_key = config.llm.api_key.clone().ok_or_else(|| {
            ApiError::BadRequest("OPENAI_API_KEY is not set and no key is configured".to_string())
        })?;
        let llm: Arc<dyn LlmProvider> =
            Arc::new(OpenAiProvider::new(config.llm.base_url.clone(), api_key));

        let store = build_store(&config.retrieval)?;
        tracing::info!("retrieval backend '{}' ready", store.name());

        Ok(Self::assemble(config, store, llm))
    }

    /// Assemble state from explicit parts. This is the seam for swapping
    /// either capability out, e.g. in tests.
    pub fn assemble(
        config: AppConfig,
        store: Arc<dyn VectorStore>,
        llm: Arc<dyn LlmProvider>,
    ) -> Arc<Self> {
        let rag = Arc::new(RagService::new(store));

        Arc::new(AppState {
            config: Arc::new(config),
            history: Arc::new(HistoryStore::new()),
            rag,
            llm,
        })
    }
}
