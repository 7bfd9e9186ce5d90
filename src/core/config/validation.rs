use super::settings::{AppConfig, StoreBackend};
use crate::core::errors::ApiError;

pub fn validate(config: &AppConfig) -> Result<(), ApiError> {
    require_non_empty("chat.system_prompt", &config.chat.system_prompt)?;

    if config.retrieval.top_k == 0 {
        return Err(invalid("retrieval.top_k", "must be a positive integer"));
    }

    require_non_empty("llm.base_url", &config.llm.base_url)?;
    require_non_empty("llm.model", &config.llm.model)?;

    if !(0.0..=2.0).contains(&config.llm.temperature) {
        return Err(invalid("llm.temperature", "must be between 0.0 and 2.0"));
    }
    if config.llm.max_tokens == 0 {
        return Err(invalid("llm.max_tokens", "must be a positive integer"));
    }

    if config
        .llm
        .api_key
        .as_deref()
        .map(str::trim)
        .unwrap_or("")
        .is_empty()
    {
        return Err(invalid(
            "llm.api_key",
            "OPENAI_API_KEY is not set and no key is configured",
        ));
    }

    match config.retrieval.backend {
        StoreBackend::Mock => {}
        StoreBackend::Chroma => {
            require_non_empty("retrieval.chroma.base_url", &config.retrieval.chroma.base_url)?;
            require_non_empty(
                "retrieval.chroma.collection",
                &config.retrieval.chroma.collection,
            )?;
        }
        StoreBackend::Astra => {
            let endpoint = config.retrieval.astra.endpoint.as_deref().unwrap_or("");
            let token = config.retrieval.astra.token.as_deref().unwrap_or("");
            if endpoint.trim().is_empty() || token.trim().is_empty() {
                return Err(invalid(
                    "retrieval.astra",
                    "ASTRA_DB_ENDPOINT and ASTRA_DB_TOKEN must be set in the environment",
                ));
            }
            require_non_empty("retrieval.astra.keyspace", &config.retrieval.astra.keyspace)?;
            require_non_empty(
                "retrieval.astra.collection",
                &config.retrieval.astra.collection,
            )?;
        }
    }

    Ok(())
}

fn require_non_empty(path: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(invalid(path, "value cannot be empty"));
    }
    Ok(())
}

fn invalid(path: &str, reason: &str) -> ApiError {
    ApiError::BadRequest(format!("Invalid config at '{}': {}", path, reason))
}
