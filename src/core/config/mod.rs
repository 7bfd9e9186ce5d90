pub mod paths;
pub mod settings;
pub mod validation;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, AstraConfig, ChatConfig, ChromaConfig, LlmConfig, RetrievalConfig, ServerConfig,
    StoreBackend,
};
