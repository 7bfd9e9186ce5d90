use std::env;
use std::fs;

use serde::Deserialize;

use super::paths::AppPaths;
use super::validation::validate;
use crate::core::errors::ApiError;

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that answers questions based on the given context and chat history.";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub chat: ChatConfig,
    pub llm: LlmConfig,
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub system_prompt: String,
    /// How many trailing history messages accompany each turn. The
    /// orchestrator itself never trims; the chat handler applies this.
    pub history_window: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub backend: StoreBackend,
    pub top_k: usize,
    /// Wrap the selected backend in the content-dedup decorator. Kept
    /// on by default so a store swap cannot silently reintroduce
    /// duplicate hits.
    pub dedupe: bool,
    pub chroma: ChromaConfig,
    pub astra: AstraConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mock,
    Chroma,
    Astra,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChromaConfig {
    pub base_url: String,
    pub collection: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AstraConfig {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub keyspace: String,
    pub collection: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8000 }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            history_window: 5,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o".to_string(),
            temperature: 0.7,
            max_tokens: 1500,
            api_key: None,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Mock,
            top_k: 5,
            dedupe: true,
            chroma: ChromaConfig::default(),
            astra: AstraConfig::default(),
        }
    }
}

impl Default for StoreBackend {
    fn default() -> Self {
        StoreBackend::Mock
    }
}

impl Default for ChromaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            collection: "prompt_engineering".to_string(),
        }
    }
}

impl Default for AstraConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            token: None,
            keyspace: "default_keyspace".to_string(),
            collection: "default_collection".to_string(),
        }
    }
}

impl AppConfig {
    /// Load the config file (missing file means defaults), layer
    /// environment overrides on top, then validate.
    pub fn load(paths: &AppPaths) -> Result<Self, ApiError> {
        let path = paths.config_path();
        let mut config = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(ApiError::internal)?;
            toml::from_str::<AppConfig>(&contents).map_err(|e| {
                ApiError::BadRequest(format!("invalid config {}: {}", path.display(), e))
            })?
        } else {
            AppConfig::default()
        };

        config.apply_env_overrides();
        validate(&config)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(port) = env_var("PORT").and_then(|v| v.parse::<u16>().ok()) {
            self.server.port = port;
        }

        if let Some(key) = env_var("OPENAI_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(model) = env_var("CHAT_GPT_MODEL") {
            self.llm.model = model;
        }
        if let Some(temperature) = env_var("CHAT_GPT_TEMPERATURE").and_then(|v| v.parse().ok()) {
            self.llm.temperature = temperature;
        }
        if let Some(max_tokens) = env_var("CHAT_GPT_MAX_TOKENS").and_then(|v| v.parse().ok()) {
            self.llm.max_tokens = max_tokens;
        }

        if let Some(endpoint) = env_var("ASTRA_DB_ENDPOINT") {
            self.retrieval.astra.endpoint = Some(endpoint);
        }
        if let Some(token) = env_var("ASTRA_DB_TOKEN") {
            self.retrieval.astra.token = Some(token);
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // tests that touch process env must not run interleaved
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn defaults_match_reference_values() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.chat.history_window, 5);
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.temperature, 0.7);
        assert_eq!(config.llm.max_tokens, 1500);
        assert_eq!(config.retrieval.backend, StoreBackend::Mock);
        assert_eq!(config.retrieval.top_k, 5);
        assert!(config.retrieval.dedupe);
        assert!(config
            .chat
            .system_prompt
            .contains("answers questions based on the given context"));
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_sections() {
        let parsed: AppConfig = toml::from_str(
            r#"
            [retrieval]
            backend = "chroma"
            top_k = 3

            [retrieval.chroma]
            collection = "docs"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.retrieval.backend, StoreBackend::Chroma);
        assert_eq!(parsed.retrieval.top_k, 3);
        assert_eq!(parsed.retrieval.chroma.collection, "docs");
        // untouched sections fall back to defaults
        assert_eq!(parsed.retrieval.chroma.base_url, "http://localhost:8000");
        assert_eq!(parsed.server.port, 8000);
        assert_eq!(parsed.llm.model, "gpt-4o");
    }

    #[test]
    fn backend_names_parse_lowercase() {
        for (name, backend) in [
            ("mock", StoreBackend::Mock),
            ("chroma", StoreBackend::Chroma),
            ("astra", StoreBackend::Astra),
        ] {
            let parsed: AppConfig =
                toml::from_str(&format!("[retrieval]\nbackend = \"{}\"", name)).unwrap();
            assert_eq!(parsed.retrieval.backend, backend);
        }

        assert!(toml::from_str::<AppConfig>("[retrieval]\nbackend = \"pinecone\"").is_err());
    }

    #[test]
    fn env_values_override_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("OPENAI_API_KEY", "sk-env");
        env::set_var("CHAT_GPT_MODEL", "gpt-4o-mini");
        env::set_var("CHAT_GPT_TEMPERATURE", "0.2");
        env::set_var("CHAT_GPT_MAX_TOKENS", "256");

        let mut config = AppConfig::default();
        config.apply_env_overrides();

        env::remove_var("OPENAI_API_KEY");
        env::remove_var("CHAT_GPT_MODEL");
        env::remove_var("CHAT_GPT_TEMPERATURE");
        env::remove_var("CHAT_GPT_MAX_TOKENS");

        assert_eq!(config.llm.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.temperature, 0.2);
        assert_eq!(config.llm.max_tokens, 256);

        // blank values are ignored rather than applied
        env::set_var("CHAT_GPT_MODEL", "");
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        env::remove_var("CHAT_GPT_MODEL");
        assert_eq!(config.llm.model, "gpt-4o");
    }

    #[test]
    fn load_reads_file_from_override_path() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
            [server]
            port = 9090

            [llm]
            api_key = "test-key"
            "#,
        )
        .unwrap();

        // keep ambient env from overriding what the file sets
        env::remove_var("PORT");
        env::remove_var("OPENAI_API_KEY");
        env::set_var("RAGCHAT_CONFIG_PATH", &config_path);
        let paths = AppPaths {
            project_root: dir.path().to_path_buf(),
            log_dir: dir.path().join("logs"),
        };
        let loaded = AppConfig::load(&paths);
        env::remove_var("RAGCHAT_CONFIG_PATH");

        let config = loaded.unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.llm.api_key.as_deref(), Some("test-key"));
    }
}
