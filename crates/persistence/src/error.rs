//! Persistence errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Server error {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Rejected with {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Question file error: {0}")]
    QuestionFile(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Timeout")]
    Timeout,
}

impl PersistenceError {
    /// Network failures, timeouts and 5xx responses are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PersistenceError::Request(_) | PersistenceError::Server { .. } | PersistenceError::Timeout
        )
    }
}

impl From<reqwest::Error> for PersistenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PersistenceError::Timeout
        } else {
            PersistenceError::Request(err.to_string())
        }
    }
}

impl From<PersistenceError> for survey_agent_core::Error {
    fn from(err: PersistenceError) -> Self {
        survey_agent_core::Error::Persistence(err.to_string())
    }
}
