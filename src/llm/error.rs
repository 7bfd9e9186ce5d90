use thiserror::Error;

/// Failures from the text-generation provider.
///
/// These are kept separate from [`crate::core::errors::ApiError`] on
/// purpose: a generation failure is recoverable at the chat handler
/// (the user gets an apology reply instead of an HTTP error), while
/// retrieval and state failures are not.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("provider returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed provider response: {0}")]
    Malformed(String),
}

impl LlmError {
    pub fn request<E: std::fmt::Display>(err: E) -> Self {
        LlmError::Request(err.to_string())
    }
}
