//! LLM integration for the survey agent
//!
//! Features:
//! - Chat backends (Ollama, OpenAI-compatible such as Groq) with retry
//! - Prompt assembly from persona, directive and transcript window
//! - Response classifier adapter with closed-label normalization
//! - Response generator adapter with fallback text

pub mod backend;
pub mod classifier;
pub mod factory;
pub mod generator;
pub mod prompt;

pub use backend::{
    FinishReason, GenerationOptions, GenerationResult, LlmBackend, LlmConfig, OllamaBackend,
    OpenAIBackend, OpenAIConfig, RetryPolicy,
};
pub use classifier::{normalize_label, LlmResponseClassifier};
pub use factory::{create_backend, LlmAdapters};
pub use generator::{Clock, LlmResponseGenerator, SystemClock};
pub use prompt::{Message, PromptBuilder, Role};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl LlmError {
    /// Network failures and timeouts are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, LlmError::Network(_) | LlmError::Timeout)
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Network(err.to_string())
    }
}

impl From<LlmError> for survey_agent_core::Error {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Timeout => survey_agent_core::Error::Timeout,
            other => survey_agent_core::Error::Llm(other.to_string()),
        }
    }
}
