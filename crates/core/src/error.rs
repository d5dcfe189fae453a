//! Error types shared by every port

use thiserror::Error;

/// Result alias using the core error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors crossing a port boundary
#[derive(Error, Debug)]
pub enum Error {
    #[error("Speech capture error: {0}")]
    Capture(String),

    #[error("Speech playback error: {0}")]
    Playback(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Timeout")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the failure happened while capturing or playing speech
    pub fn is_speech(&self) -> bool {
        matches!(self, Error::Capture(_) | Error::Playback(_))
    }
}
