use async_trait::async_trait;

use super::error::LlmError;
use super::types::GenerationRequest;

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// return the provider name (e.g. "openai")
    fn name(&self) -> &str;

    /// Send a chat-completion request and return the assistant's reply text.
    async fn chat(&self, request: GenerationRequest) -> Result<String, LlmError>;
}
